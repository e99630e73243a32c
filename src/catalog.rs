//! Static district and region reference data.
//!
//! The administrative hierarchy is fixed at compile time: regions carry a
//! single-letter code, districts a two-letter code whose first letter is
//! the owning region's. Loaded once into static tables, never mutated.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// An administrative region.
#[derive(Debug, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
    pub districts: &'static [District],
}

/// An administrative district within a region.
#[derive(Debug, PartialEq, Eq)]
pub struct District {
    pub code: &'static str,
    pub name: &'static str,
    pub region_code: &'static str,
}

impl District {
    const fn new(code: &'static str, name: &'static str, region_code: &'static str) -> Self {
        Self {
            code,
            name,
            region_code,
        }
    }
}

/// Outcome of a fuzzy district-name match.
///
/// `exact` is set for case-insensitive equality; `ambiguous` is set when
/// more than one district matched by substring and the first in catalog
/// iteration order was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistrictMatch {
    pub district: &'static District,
    pub exact: bool,
    pub ambiguous: bool,
}

static GREATER_ACCRA: &[District] = &[
    District::new("GA", "Accra Metropolitan", "G"),
    District::new("GT", "Tema Metropolitan", "G"),
    District::new("GE", "Ga East Municipal", "G"),
    District::new("GW", "Ga West Municipal", "G"),
    District::new("GS", "Ga South Municipal", "G"),
    District::new("GL", "Ledzokuku Municipal", "G"),
];

static ASHANTI: &[District] = &[
    District::new("AK", "Kumasi Metropolitan", "A"),
    District::new("AO", "Obuasi Municipal", "A"),
    District::new("AE", "Ejisu Municipal", "A"),
    District::new("AS", "Asokore Mampong Municipal", "A"),
    District::new("AB", "Bekwai Municipal", "A"),
];

static WESTERN: &[District] = &[
    District::new("WS", "Sekondi-Takoradi Metropolitan", "W"),
    District::new("WT", "Tarkwa-Nsuaem Municipal", "W"),
    District::new("WA", "Ahanta West Municipal", "W"),
    District::new("WE", "Effia-Kwesimintsim Municipal", "W"),
];

static WESTERN_NORTH: &[District] = &[
    District::new("YW", "Sefwi Wiawso Municipal", "Y"),
    District::new("YB", "Bibiani-Anhwiaso-Bekwai Municipal", "Y"),
    District::new("YJ", "Juaboso", "Y"),
];

static CENTRAL: &[District] = &[
    District::new("CC", "Cape Coast Metropolitan", "C"),
    District::new("CK", "Komenda-Edina-Eguafo-Abirem Municipal", "C"),
    District::new("CM", "Mfantsiman Municipal", "C"),
    District::new("CA", "Awutu Senya East Municipal", "C"),
];

static EASTERN: &[District] = &[
    District::new("EN", "New Juaben South Municipal", "E"),
    District::new("EB", "Birim Central Municipal", "E"),
    District::new("EA", "Akuapem North Municipal", "E"),
    District::new("EW", "West Akim Municipal", "E"),
    District::new("EK", "Kwahu West Municipal", "E"),
];

static VOLTA: &[District] = &[
    District::new("VH", "Ho Municipal", "V"),
    District::new("VK", "Keta Municipal", "V"),
    District::new("VO", "Hohoe Municipal", "V"),
    District::new("VA", "Anloga", "V"),
];

static OTI: &[District] = &[
    District::new("OJ", "Jasikan", "O"),
    District::new("OK", "Kadjebi", "O"),
    District::new("ON", "Nkwanta South Municipal", "O"),
];

static NORTHERN: &[District] = &[
    District::new("NT", "Tamale Metropolitan", "N"),
    District::new("NS", "Sagnarigu Municipal", "N"),
    District::new("NY", "Yendi Municipal", "N"),
    District::new("NG", "Gushegu Municipal", "N"),
];

static SAVANNAH: &[District] = &[
    District::new("SW", "West Gonja Municipal", "S"),
    District::new("SB", "Bole", "S"),
    District::new("SE", "East Gonja Municipal", "S"),
];

static NORTH_EAST: &[District] = &[
    District::new("ME", "East Mamprusi Municipal", "M"),
    District::new("MW", "West Mamprusi Municipal", "M"),
];

static UPPER_EAST: &[District] = &[
    District::new("UB", "Bolgatanga Municipal", "U"),
    District::new("UK", "Kassena-Nankana Municipal", "U"),
    District::new("UA", "Bawku Municipal", "U"),
];

static UPPER_WEST: &[District] = &[
    District::new("PW", "Wa Municipal", "P"),
    District::new("PN", "Nadowli-Kaleo", "P"),
    District::new("PL", "Lawra Municipal", "P"),
];

static BONO: &[District] = &[
    District::new("BS", "Sunyani Municipal", "B"),
    District::new("BW", "Sunyani West Municipal", "B"),
    District::new("BD", "Dormaa Central Municipal", "B"),
    District::new("BB", "Berekum East Municipal", "B"),
];

static BONO_EAST: &[District] = &[
    District::new("TT", "Techiman Municipal", "T"),
    District::new("TK", "Kintampo North Municipal", "T"),
    District::new("TA", "Atebubu-Amantin Municipal", "T"),
];

static AHAFO: &[District] = &[
    District::new("HG", "Asunafo North Municipal", "H"),
    District::new("HT", "Tano South Municipal", "H"),
    District::new("HB", "Asutifi North", "H"),
];

/// All regions in catalog iteration order.
pub static REGIONS: &[Region] = &[
    Region { code: "G", name: "Greater Accra", districts: GREATER_ACCRA },
    Region { code: "A", name: "Ashanti", districts: ASHANTI },
    Region { code: "W", name: "Western", districts: WESTERN },
    Region { code: "Y", name: "Western North", districts: WESTERN_NORTH },
    Region { code: "C", name: "Central", districts: CENTRAL },
    Region { code: "E", name: "Eastern", districts: EASTERN },
    Region { code: "V", name: "Volta", districts: VOLTA },
    Region { code: "O", name: "Oti", districts: OTI },
    Region { code: "N", name: "Northern", districts: NORTHERN },
    Region { code: "S", name: "Savannah", districts: SAVANNAH },
    Region { code: "M", name: "North East", districts: NORTH_EAST },
    Region { code: "U", name: "Upper East", districts: UPPER_EAST },
    Region { code: "P", name: "Upper West", districts: UPPER_WEST },
    Region { code: "B", name: "Bono", districts: BONO },
    Region { code: "T", name: "Bono East", districts: BONO_EAST },
    Region { code: "H", name: "Ahafo", districts: AHAFO },
];

static DISTRICT_BY_CODE: Lazy<FxHashMap<&'static str, &'static District>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for region in REGIONS {
        for district in region.districts {
            map.insert(district.code, district);
        }
    }
    map
});

static REGION_BY_CODE: Lazy<FxHashMap<&'static str, &'static Region>> = Lazy::new(|| {
    REGIONS.iter().map(|region| (region.code, region)).collect()
});

/// Read-only resolution between district/region codes and names.
#[derive(Debug, Clone, Copy)]
pub struct DistrictCatalog {
    regions: &'static [Region],
}

impl DistrictCatalog {
    /// Catalog over the built-in region table.
    pub const fn new() -> Self {
        Self { regions: REGIONS }
    }

    /// All regions in iteration order.
    pub fn regions(&self) -> &'static [Region] {
        self.regions
    }

    /// All districts in catalog iteration order (region order, then
    /// district order within the region).
    pub fn districts(&self) -> impl Iterator<Item = &'static District> {
        self.regions.iter().flat_map(|region| region.districts)
    }

    /// Look up a district by its two-letter code (case-insensitive).
    pub fn find_district_by_code(&self, code: &str) -> Option<&'static District> {
        let code = code.trim().to_ascii_uppercase();
        DISTRICT_BY_CODE.get(code.as_str()).copied()
    }

    /// Look up a region by its single-letter code (case-insensitive).
    pub fn find_region_by_code(&self, code: &str) -> Option<&'static Region> {
        let code = code.trim().to_ascii_uppercase();
        REGION_BY_CODE.get(code.as_str()).copied()
    }

    /// Look up a region by name (case-insensitive, exact).
    pub fn find_region_by_name(&self, name: &str) -> Option<&'static Region> {
        let name = name.trim();
        self.regions
            .iter()
            .find(|region| region.name.eq_ignore_ascii_case(name))
    }

    /// The region owning a district.
    pub fn region_of(&self, district: &District) -> Option<&'static Region> {
        REGION_BY_CODE.get(district.region_code).copied()
    }

    /// Fuzzy-match a free-text district name, as returned by a geocoding
    /// collaborator, against the official catalog.
    ///
    /// Case-insensitive equality outranks substring containment (checked
    /// in both directions). When several districts substring-match, the
    /// first in catalog iteration order wins, the result is flagged
    /// `ambiguous`, and a warning is logged; callers should not treat an
    /// ambiguous match as authoritative.
    pub fn match_district_name(&self, name: &str) -> Option<DistrictMatch> {
        let needle = name.trim();
        if needle.is_empty() {
            return None;
        }

        if let Some(district) = self
            .districts()
            .find(|district| district.name.eq_ignore_ascii_case(needle))
        {
            return Some(DistrictMatch {
                district,
                exact: true,
                ambiguous: false,
            });
        }

        let lowered = needle.to_ascii_lowercase();
        let hits: Vec<&'static District> = self
            .districts()
            .filter(|district| {
                let official = district.name.to_ascii_lowercase();
                official.contains(&lowered) || lowered.contains(&official)
            })
            .collect();

        let (&first, rest) = hits.split_first()?;
        if !rest.is_empty() {
            log::warn!(
                "district name '{needle}' matched {} catalog entries; using '{}'",
                hits.len(),
                first.name
            );
        }
        Some(DistrictMatch {
            district: first,
            exact: false,
            ambiguous: !rest.is_empty(),
        })
    }
}

impl Default for DistrictCatalog {
    fn default() -> Self {
        Self::new()
    }
}
