//! The fixed brand registry.
//!
//! Each brand owns a dedicated record collection. Lookup is a static match,
//! not data-driven: adding a brand means adding a variant, a collection and a
//! migration. Every brand shares the canonical [`BrandRecord`] shape today but
//! keeps its own arm in each match so it can diverge independently.
//!
//! [`BrandRecord`]: crate::record::BrandRecord

mod handle;

pub use handle::BrandHandle;

use std::fmt;

use serde::{Serialize, Serializer};

/// A brand with its own record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Brand {
    /// Sterilite.
    Sterilite,
    /// Nike.
    Nike,
    /// TJX.
    Tjx,
    /// Landmark Splash.
    LandmarkSplash,
    /// Landmark BBS.
    LandmarkBbs,
    /// Landmark MAX.
    LandmarkMax,
    /// Nilron.
    Nilron,
    /// Walmart.
    Walmart,
    /// H&M.
    Hm,
    /// TTI.
    Tti,
    /// TATA.
    Tata,
    /// Inditex.
    Inditex,
    /// DCL.
    Dcl,
    /// Padini.
    Padini,
    /// KMART.
    Kmart,
}

impl Brand {
    /// Every brand, in the order brand lists are returned.
    pub const ALL: [Self; 15] = [
        Self::Sterilite,
        Self::Nike,
        Self::Tjx,
        Self::LandmarkSplash,
        Self::LandmarkBbs,
        Self::LandmarkMax,
        Self::Nilron,
        Self::Walmart,
        Self::Hm,
        Self::Tti,
        Self::Tata,
        Self::Inditex,
        Self::Dcl,
        Self::Padini,
        Self::Kmart,
    ];

    /// Canonical brand name. Spelling and case are significant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sterilite => "Sterilite",
            Self::Nike => "Nike",
            Self::Tjx => "TJX",
            Self::LandmarkSplash => "Landmark-Splash",
            Self::LandmarkBbs => "Landmark-BBS",
            Self::LandmarkMax => "Landmark-MAX",
            Self::Nilron => "Nilron",
            Self::Walmart => "Walmart",
            Self::Hm => "H&M",
            Self::Tti => "TTI",
            Self::Tata => "TATA",
            Self::Inditex => "Inditex",
            Self::Dcl => "DCL",
            Self::Padini => "Padini",
            Self::Kmart => "KMART",
        }
    }

    /// Name of the brand's dedicated collection (table).
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Sterilite => "sterilite_records",
            Self::Nike => "nike_records",
            Self::Tjx => "tjx_records",
            Self::LandmarkSplash => "landmark_splash_records",
            Self::LandmarkBbs => "landmark_bbs_records",
            Self::LandmarkMax => "landmark_max_records",
            Self::Nilron => "nilron_records",
            Self::Walmart => "walmart_records",
            Self::Hm => "hm_records",
            Self::Tti => "tti_records",
            Self::Tata => "tata_records",
            Self::Inditex => "inditex_records",
            Self::Dcl => "dcl_records",
            Self::Padini => "padini_records",
            Self::Kmart => "kmart_records",
        }
    }

    /// Resolves a brand by its exact canonical name.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "Sterilite" => Some(Self::Sterilite),
            "Nike" => Some(Self::Nike),
            "TJX" => Some(Self::Tjx),
            "Landmark-Splash" => Some(Self::LandmarkSplash),
            "Landmark-BBS" => Some(Self::LandmarkBbs),
            "Landmark-MAX" => Some(Self::LandmarkMax),
            "Nilron" => Some(Self::Nilron),
            "Walmart" => Some(Self::Walmart),
            "H&M" => Some(Self::Hm),
            "TTI" => Some(Self::Tti),
            "TATA" => Some(Self::Tata),
            "Inditex" => Some(Self::Inditex),
            "DCL" => Some(Self::Dcl),
            "Padini" => Some(Self::Padini),
            "KMART" => Some(Self::Kmart),
            _ => None,
        }
    }

    /// Names of all brands.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|b| b.as_str()).collect()
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Brand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
