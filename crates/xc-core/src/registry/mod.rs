//! Read-only table of every functional this crate can build.

mod table;

pub use table::{
    GGA_C_P86, GGA_C_PBE, GGA_C_PBE_REVTPSS, GGA_C_PBE_SOL, GGA_C_XPBE, GGA_X_B88, GGA_X_PBE,
    GGA_X_PBE_R, GGA_X_PBE_SOL, HYB_GGA_XC_B3P86, HYB_GGA_XC_PBEH, LDA_C_PW, LDA_C_PW_MOD,
    LDA_C_PZ, LDA_C_PZ_MOD, LDA_C_VWN, LDA_C_VWN_RPA, LDA_X,
};

use crate::domain::{Capabilities, Family, FunctionalId, FunctionalKind, XcError, XcResult};
use crate::functionals::gga::GgaRecipe;
use crate::functionals::hybrid::HybridRecipe;
use crate::functionals::lda::LdaRecipe;
use serde::Serialize;

/// How a state for this functional is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipe {
    Lda(LdaRecipe),
    Gga(GgaRecipe),
    Hybrid(HybridRecipe),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FunctionalDescriptor {
    pub id: FunctionalId,
    pub name: &'static str,
    pub kind: FunctionalKind,
    pub family: Family,
    pub description: &'static str,
    pub reference: &'static str,
    pub capabilities: Capabilities,
    pub recipe: Recipe,
}

const fn ids_are_unique(table: &[FunctionalDescriptor]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let mut j = i + 1;
        while j < table.len() {
            if table[i].id == table[j].id {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    ids_are_unique(&table::FUNCTIONALS),
    "functional identifiers must be unique"
);

pub fn descriptors() -> &'static [FunctionalDescriptor] {
    &table::REGISTRY
}

pub fn lookup(id: FunctionalId) -> XcResult<&'static FunctionalDescriptor> {
    table::REGISTRY
        .iter()
        .find(|descriptor| descriptor.id == id)
        .ok_or(XcError::UnknownFunctional { id })
}

/// Case-insensitive lookup by short name; an `xc_` prefix is accepted.
pub fn find_by_name(name: &str) -> XcResult<&'static FunctionalDescriptor> {
    let trimmed = name.trim();
    let short = trimmed
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("xc_"))
        .map_or(trimmed, |_| &trimmed[3..]);
    table::REGISTRY
        .iter()
        .find(|descriptor| descriptor.name.eq_ignore_ascii_case(short))
        .ok_or_else(|| XcError::UnknownFunctionalName {
            name: name.to_string(),
        })
}

/// Accepts either a numeric identifier or a short name.
pub fn resolve(key: &str) -> XcResult<&'static FunctionalDescriptor> {
    match key.trim().parse::<FunctionalId>() {
        Ok(id) => lookup(id),
        Err(_) => find_by_name(key),
    }
}

#[cfg(test)]
mod tests {
    use super::{Recipe, descriptors, find_by_name, lookup, resolve};
    use crate::domain::{DerivativeOrder, Family, XcError};

    #[test]
    fn every_registered_identifier_resolves_to_itself() {
        for descriptor in descriptors() {
            let found = lookup(descriptor.id).expect("registered id should resolve");
            assert_eq!(found.id, descriptor.id);
            assert_eq!(find_by_name(descriptor.name).map(|d| d.id), Ok(descriptor.id));
        }
    }

    #[test]
    fn unknown_identifiers_and_names_fail() {
        assert_eq!(lookup(0), Err(XcError::UnknownFunctional { id: 0 }));
        assert_eq!(lookup(131), Err(XcError::UnknownFunctional { id: 131 }));
        assert!(matches!(
            find_by_name("gga_c_lyp"),
            Err(XcError::UnknownFunctionalName { .. })
        ));
    }

    #[test]
    fn names_and_numbers_are_both_accepted() {
        assert_eq!(resolve("130").map(|d| d.name), Ok("gga_c_pbe"));
        assert_eq!(resolve("XC_GGA_C_PBE").map(|d| d.id), Ok(130));
        assert_eq!(resolve(" hyb_gga_xc_pbeh ").map(|d| d.id), Ok(406));
    }

    #[test]
    fn recipes_agree_with_families_and_capabilities() {
        for descriptor in descriptors() {
            let family = match descriptor.recipe {
                Recipe::Lda(_) => Family::Lda,
                Recipe::Gga(_) => Family::Gga,
                Recipe::Hybrid(_) => Family::HybridGga,
            };
            assert_eq!(family, descriptor.family, "{}", descriptor.name);
            assert!(descriptor.capabilities.supports(DerivativeOrder::Potential));
        }
    }

    #[test]
    fn hybrid_constituents_are_registered_in_matching_families() {
        for descriptor in descriptors() {
            let Recipe::Hybrid(recipe) = descriptor.recipe else {
                continue;
            };
            for (expected, mixes) in [(Family::Lda, recipe.lda), (Family::Gga, recipe.gga)] {
                for mix in mixes {
                    let part = lookup(mix.id).expect("constituent should be registered");
                    assert_eq!(part.family, expected);
                    assert!(mix.coefficient > 0.0);
                }
            }
        }
    }
}
