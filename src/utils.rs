use std::str::FromStr;

use geometry::Point;
use units::Length;

/// Parse `x,y,z` into a triplet. Surrounding whitespace of each component is
/// ignored.
pub fn parse_triplet<T: FromStr>(s: &str) -> Result<(T,T,T), String>
where
    <T as FromStr>::Err: std::fmt::Display,
{
    let v = s.split(',').map(str::trim).collect::<Vec<_>>();
    if v.len() != 3 {
        return Err(format!("expected 3 comma-separated values, found {}", v.len()))
    }
    let parse = |s: &str| s.parse::<T>().map_err(|e| format!("`{s}`: {e}"));
    Ok((parse(v[0])?, parse(v[1])?, parse(v[2])?))
}

/// Parse `x,y,z` lengths with units, such as `0 mm, 0 mm, -985.875 mm`
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y, z) = parse_triplet::<Length>(s)?;
    Ok(Point::new(x, y, z))
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;
    use std::io::Write;

    pub struct Progress {
        previous: Instant,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now() } }

        /// Print message, append ellipsis, flush stdout, stay on same line, start timer.
        pub fn start(&mut self, message: &str) {
            print!("{message} ... ");
            std::io::stdout().flush().ok();
            self.start_timer();
        }

        /// Print time elapsed since last start or done
        pub fn done(&mut self) {
            println!("{} ms", group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}
