//! Longitudinal segmentation of the calorimeter.
//!
//! Each variant is described by 7 non-decreasing layer-index cut points,
//! delimiting 6 sub-sections `[b[i], b[i+1])`, each with its own absorber /
//! active-medium combination. Sub-sections 0-2 form the EM section, 3 the
//! front hadronic section and 4-5 the back hadronic section.

use std::ops::Range;

use crate::variant::Variant;

pub type Layer = usize;

pub const N_BOUNDARIES  : usize = 7;
pub const N_SUB_SECTIONS: usize = N_BOUNDARIES - 1;
pub const N_SECTIONS    : usize = 3;

/// Logical longitudinal section, sharing a single linear energy calibration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section { Em, FrontHcal, BackHcal }

impl Section {

    pub const ALL: [Section; N_SECTIONS] = [Section::Em, Section::FrontHcal, Section::BackHcal];

    pub fn index(self) -> usize { self as usize }

    pub fn of_sub_section(sub_section: usize) -> Self {
        match sub_section {
            0..=2 => Section::Em,
            3     => Section::FrontHcal,
            _     => Section::BackHcal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Em        => "ECAL",
            Section::FrontHcal => "FHCAL",
            Section::BackHcal  => "BHCAL",
        }
    }

    pub fn is_hadronic(self) -> bool { self != Section::Em }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionLayout {
    boundaries: [Layer; N_BOUNDARIES],
    // Indexed by layer; layers at or beyond the last boundary are absent
    sub_section_of_layer: Vec<usize>,
}

impl SectionLayout {

    pub fn new(variant: Variant) -> Self {
        Self::from_boundaries(Self::boundaries_of(variant))
    }

    pub fn boundaries_of(variant: Variant) -> [Layer; N_BOUNDARIES] {
        match variant {
            Variant::FullEmHcal           => [0, 11, 21, 31, 55, 64, 64],
            Variant::HcalOnlySilicon      => [0,  0,  0,  0, 24, 33, 33],
            Variant::HcalOnlyScintillator => [0,  0,  0,  0,  0,  9,  9],
            Variant::CaliceHcal           => [0,  0,  0,  0, 38, 47, 54],
        }
    }

    fn from_boundaries(boundaries: [Layer; N_BOUNDARIES]) -> Self {
        debug_assert!(boundaries.windows(2).all(|b| b[0] <= b[1]),
                      "layer boundaries must be non-decreasing: {boundaries:?}");
        let n_layers = boundaries[N_SUB_SECTIONS];
        let sub_section_of_layer = (0..n_layers)
            .map(|layer| boundaries
                 .windows(2)
                 .position(|b| b[0] <= layer && layer < b[1])
                 .unwrap_or(0))
            .collect();
        Self { boundaries, sub_section_of_layer }
    }

    pub fn boundaries(&self) -> &[Layer; N_BOUNDARIES] { &self.boundaries }

    /// Sub-section (0..6) containing `layer`, if the layer exists in this layout
    pub fn sub_section(&self, layer: Layer) -> Option<usize> {
        self.sub_section_of_layer.get(layer).copied()
    }

    /// Logical section containing `layer`, if the layer exists in this layout
    pub fn section(&self, layer: Layer) -> Option<Section> {
        self.sub_section(layer).map(Section::of_sub_section)
    }

    /// Layers belonging to `section`
    pub fn layers(&self, section: Section) -> Range<Layer> {
        let b = &self.boundaries;
        match section {
            Section::Em        => b[0]..b[3],
            Section::FrontHcal => b[3]..b[4],
            Section::BackHcal  => b[4]..b[6],
        }
    }

    pub fn n_layers(&self, section: Section) -> usize { self.layers(section).len() }

    pub fn n_layers_total(&self) -> usize { self.sub_section_of_layer.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use Variant::*;
    use Section::*;

    #[rstest(/**/ variant,              layer, sub_section, section,
             case(FullEmHcal          ,  0,     Some(0),     Some(Em)),
             case(FullEmHcal          ,  5,     Some(0),     Some(Em)),
             case(FullEmHcal          , 11,     Some(1),     Some(Em)),
             case(FullEmHcal          , 30,     Some(2),     Some(Em)),
             case(FullEmHcal          , 31,     Some(3),     Some(FrontHcal)),
             case(FullEmHcal          , 40,     Some(3),     Some(FrontHcal)),
             case(FullEmHcal          , 51,     Some(3),     Some(FrontHcal)),
             case(FullEmHcal          , 55,     Some(4),     Some(BackHcal)),
             case(FullEmHcal          , 63,     Some(4),     Some(BackHcal)),
             case(FullEmHcal          , 64,     None   ,     None),
             case(HcalOnlySilicon     ,  0,     Some(3),     Some(FrontHcal)),
             case(HcalOnlySilicon     , 24,     Some(4),     Some(BackHcal)),
             case(HcalOnlySilicon     , 33,     None   ,     None),
             case(HcalOnlyScintillator,  0,     Some(4),     Some(BackHcal)),
             case(HcalOnlyScintillator,  8,     Some(4),     Some(BackHcal)),
             case(HcalOnlyScintillator,  9,     None   ,     None),
             case(CaliceHcal          ,  0,     Some(3),     Some(FrontHcal)),
             case(CaliceHcal          , 38,     Some(4),     Some(BackHcal)),
             case(CaliceHcal          , 47,     Some(5),     Some(BackHcal)),
             case(CaliceHcal          , 53,     Some(5),     Some(BackHcal)),
             case(CaliceHcal          , 54,     None   ,     None),
    )]
    fn layer_lookup(variant: Variant, layer: Layer, sub_section: Option<usize>, section: Option<Section>) {
        let layout = SectionLayout::new(variant);
        assert_eq!(layout.sub_section(layer), sub_section);
        assert_eq!(layout.section    (layer), section);
    }

    #[rstest(/**/ variant,              em, front, back,
             case(FullEmHcal          , 31,    24,    9),
             case(HcalOnlySilicon     ,  0,    24,    9),
             case(HcalOnlyScintillator,  0,     0,    9),
             case(CaliceHcal          ,  0,    38,   16),
    )]
    fn section_sizes(variant: Variant, em: usize, front: usize, back: usize) {
        let layout = SectionLayout::new(variant);
        assert_eq!((layout.n_layers(Em), layout.n_layers(FrontHcal), layout.n_layers(BackHcal)),
                   (em, front, back));
        assert_eq!(layout.n_layers_total(), em + front + back);
    }

    #[test]
    fn every_layer_is_in_the_range_of_its_section() {
        for variant in Variant::ALL {
            let layout = SectionLayout::new(variant);
            for layer in 0..layout.n_layers_total() {
                let section = layout.section(layer).unwrap();
                assert!(layout.layers(section).contains(&layer), "{variant} layer {layer}");
            }
        }
    }

    fn variant() -> impl Strategy<Value = Variant> {
        prop::sample::select(Variant::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn lookup_is_monotonic(variant in variant(), layer in 0..100_usize) {
            let layout = SectionLayout::new(variant);
            let (this, next) = (layout.sub_section(layer), layout.sub_section(layer + 1));
            match (this, next) {
                (Some(a), Some(b)) => prop_assert!(a <= b),
                (None, next)       => prop_assert_eq!(next, None),
                (Some(_), None)    => prop_assert_eq!(layer + 1, layout.n_layers_total()),
            }
        }
    }
}
