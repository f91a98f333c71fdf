use super::{FunctionalDescriptor, Recipe};
use crate::domain::{Capabilities, Family, FunctionalKind};
use crate::functionals::gga::{ExchangeEnhancement, GgaRecipe, PbeVariant};
use crate::functionals::hybrid::{HybridRecipe, Mix};
use crate::functionals::lda::{LdaRecipe, PwVariant, PzVariant, VwnVariant};

pub const LDA_X: u32 = 1;
pub const LDA_C_VWN: u32 = 7;
pub const LDA_C_VWN_RPA: u32 = 8;
pub const LDA_C_PZ: u32 = 9;
pub const LDA_C_PZ_MOD: u32 = 10;
pub const LDA_C_PW: u32 = 12;
pub const LDA_C_PW_MOD: u32 = 13;
pub const GGA_X_PBE: u32 = 101;
pub const GGA_X_PBE_R: u32 = 102;
pub const GGA_X_B88: u32 = 106;
pub const GGA_X_PBE_SOL: u32 = 116;
pub const GGA_C_PBE: u32 = 130;
pub const GGA_C_P86: u32 = 132;
pub const GGA_C_PBE_SOL: u32 = 133;
pub const GGA_C_XPBE: u32 = 136;
pub const GGA_C_PBE_REVTPSS: u32 = 137;
pub const HYB_GGA_XC_B3P86: u32 = 403;
pub const HYB_GGA_XC_PBEH: u32 = 406;

const PBE_REFERENCE: &str = "JP Perdew, K Burke, and M Ernzerhof, Phys. Rev. Lett. 77, 3865 (1996)\n\
     JP Perdew, K Burke, and M Ernzerhof, Phys. Rev. Lett. 78, 1396(E) (1997)";
const PBE_SOL_REFERENCE: &str = "JP Perdew, et al, Phys. Rev. Lett. 100, 136406 (2008)";

const B3P86_EXX: f64 = 0.20;
const B3P86_AX: f64 = 0.72;
const B3P86_AC: f64 = 0.81;

const B3P86_LDA: &[Mix] = &[
    Mix {
        id: LDA_X,
        coefficient: 1.0 - B3P86_EXX - B3P86_AX,
    },
    Mix {
        id: LDA_C_VWN_RPA,
        coefficient: 1.0 - B3P86_AC,
    },
];
const B3P86_GGA: &[Mix] = &[
    Mix {
        id: GGA_X_B88,
        coefficient: B3P86_AX,
    },
    Mix {
        id: GGA_C_P86,
        coefficient: B3P86_AC,
    },
];

const PBEH_EXX: f64 = 0.25;

const PBEH_GGA: &[Mix] = &[
    Mix {
        id: GGA_X_PBE,
        coefficient: 1.0 - PBEH_EXX,
    },
    Mix {
        id: GGA_C_PBE,
        coefficient: 1.0,
    },
];

pub const FUNCTIONALS: [FunctionalDescriptor; 18] = [
    FunctionalDescriptor {
        id: LDA_X,
        name: "lda_x",
        kind: FunctionalKind::Exchange,
        family: Family::Lda,
        description: "Slater exchange",
        reference: "PAM Dirac, Proceedings of the Cambridge Philosophical Society 26, 376 (1930)\n\
                    F Bloch, Zeitschrift fuer Physik 57, 545 (1929)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Slater),
    },
    FunctionalDescriptor {
        id: LDA_C_VWN,
        name: "lda_c_vwn",
        kind: FunctionalKind::Correlation,
        family: Family::Lda,
        description: "Vosko, Wilk, & Nusair",
        reference: "SH Vosko, L Wilk, and M Nusair, Can. J. Phys. 58, 1200 (1980)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Vwn(VwnVariant::MonteCarlo)),
    },
    FunctionalDescriptor {
        id: LDA_C_VWN_RPA,
        name: "lda_c_vwn_rpa",
        kind: FunctionalKind::Correlation,
        family: Family::Lda,
        description: "Vosko, Wilk, & Nusair (RPA)",
        reference: "SH Vosko, L Wilk, and M Nusair, Can. J. Phys. 58, 1200 (1980)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Vwn(VwnVariant::Rpa)),
    },
    FunctionalDescriptor {
        id: LDA_C_PZ,
        name: "lda_c_pz",
        kind: FunctionalKind::Correlation,
        family: Family::Lda,
        description: "Perdew & Zunger",
        reference: "JP Perdew and A Zunger, Phys. Rev. B 23, 5048 (1981)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Pz(PzVariant::Original)),
    },
    FunctionalDescriptor {
        id: LDA_C_PZ_MOD,
        name: "lda_c_pz_mod",
        kind: FunctionalKind::Correlation,
        family: Family::Lda,
        description: "Perdew & Zunger (Modified)",
        reference: "JP Perdew and A Zunger, Phys. Rev. B 23, 5048 (1981)\n\
                    Modified to improve the matching between the low- and high-rs parts",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Pz(PzVariant::Modified)),
    },
    FunctionalDescriptor {
        id: LDA_C_PW,
        name: "lda_c_pw",
        kind: FunctionalKind::Correlation,
        family: Family::Lda,
        description: "Perdew & Wang",
        reference: "JP Perdew and Y Wang, Phys. Rev. B 45, 13244 (1992)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Pw(PwVariant::Original)),
    },
    FunctionalDescriptor {
        id: LDA_C_PW_MOD,
        name: "lda_c_pw_mod",
        kind: FunctionalKind::Correlation,
        family: Family::Lda,
        description: "Perdew & Wang (Modified)",
        reference: "JP Perdew and Y Wang, Phys. Rev. B 45, 13244 (1992)\n\
                    Added extra digits to some constants as in the PBE routine",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Lda(LdaRecipe::Pw(PwVariant::Modified)),
    },
    FunctionalDescriptor {
        id: GGA_X_PBE,
        name: "gga_x_pbe",
        kind: FunctionalKind::Exchange,
        family: Family::Gga,
        description: "Perdew, Burke & Ernzerhof exchange",
        reference: PBE_REFERENCE,
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::Exchange(ExchangeEnhancement::Pbe)),
    },
    FunctionalDescriptor {
        id: GGA_X_PBE_R,
        name: "gga_x_pbe_r",
        kind: FunctionalKind::Exchange,
        family: Family::Gga,
        description: "Revised PBE from Zhang & Yang",
        reference: "Y Zhang and W Yang, Phys. Rev. Lett 80, 890 (1998)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::Exchange(ExchangeEnhancement::PbeRevised)),
    },
    FunctionalDescriptor {
        id: GGA_X_B88,
        name: "gga_x_b88",
        kind: FunctionalKind::Exchange,
        family: Family::Gga,
        description: "Becke 88",
        reference: "AD Becke, Phys. Rev. A 38, 3098 (1988)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::Exchange(ExchangeEnhancement::Becke88)),
    },
    FunctionalDescriptor {
        id: GGA_X_PBE_SOL,
        name: "gga_x_pbe_sol",
        kind: FunctionalKind::Exchange,
        family: Family::Gga,
        description: "Perdew, Burke & Ernzerhof exchange for solids",
        reference: PBE_SOL_REFERENCE,
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::Exchange(ExchangeEnhancement::PbeSol)),
    },
    FunctionalDescriptor {
        id: GGA_C_PBE,
        name: "gga_c_pbe",
        kind: FunctionalKind::Correlation,
        family: Family::Gga,
        description: "Perdew, Burke & Ernzerhof",
        reference: PBE_REFERENCE,
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::PbeCorrelation(PbeVariant::Original)),
    },
    FunctionalDescriptor {
        id: GGA_C_P86,
        name: "gga_c_p86",
        kind: FunctionalKind::Correlation,
        family: Family::Gga,
        description: "Perdew 86",
        reference: "JP Perdew, Phys. Rev. B 33, 8822 (1986)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::P86Correlation),
    },
    FunctionalDescriptor {
        id: GGA_C_PBE_SOL,
        name: "gga_c_pbe_sol",
        kind: FunctionalKind::Correlation,
        family: Family::Gga,
        description: "Perdew, Burke & Ernzerhof SOL",
        reference: PBE_SOL_REFERENCE,
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::PbeCorrelation(PbeVariant::Sol)),
    },
    FunctionalDescriptor {
        id: GGA_C_XPBE,
        name: "gga_c_xpbe",
        kind: FunctionalKind::Correlation,
        family: Family::Gga,
        description: "Extended PBE by Xu & Goddard III",
        reference: "X Xu and WA Goddard III, J. Chem. Phys. 121, 4068 (2004)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Gga(GgaRecipe::PbeCorrelation(PbeVariant::Extended)),
    },
    FunctionalDescriptor {
        id: GGA_C_PBE_REVTPSS,
        name: "gga_c_pbe_revtpss",
        kind: FunctionalKind::Correlation,
        family: Family::Gga,
        description: "Perdew, Burke & Ernzerhof for TPSS",
        reference: "Perdew, Ruzsinszky, Csonka, Constantin and Sun PRL 103 026403 (2009)",
        capabilities: Capabilities::EXC_VXC,
        recipe: Recipe::Gga(GgaRecipe::PbeCorrelation(PbeVariant::RevTpss)),
    },
    FunctionalDescriptor {
        id: HYB_GGA_XC_B3P86,
        name: "hyb_gga_xc_b3p86",
        kind: FunctionalKind::ExchangeCorrelation,
        family: Family::HybridGga,
        description: "B3P86",
        reference: "Defined through Gaussian implementation",
        capabilities: Capabilities::EXC_VXC,
        recipe: Recipe::Hybrid(HybridRecipe {
            exx: B3P86_EXX,
            lda: B3P86_LDA,
            gga: B3P86_GGA,
        }),
    },
    FunctionalDescriptor {
        id: HYB_GGA_XC_PBEH,
        name: "hyb_gga_xc_pbeh",
        kind: FunctionalKind::ExchangeCorrelation,
        family: Family::HybridGga,
        description: "PBEH (PBE0)",
        reference: "C Adamo and V Barone, J. Chem. Phys. 110, 6158 (1999)\n\
                    M. Ernzerhof, G. E. Scuseria, J. Chem. Phys. 110, 5029 (1999)",
        capabilities: Capabilities::EXC_VXC_FXC,
        recipe: Recipe::Hybrid(HybridRecipe {
            exx: PBEH_EXX,
            lda: &[],
            gga: PBEH_GGA,
        }),
    },
];

pub static REGISTRY: [FunctionalDescriptor; FUNCTIONALS.len()] = FUNCTIONALS;

#[cfg(test)]
mod tests {
    use super::{FUNCTIONALS, GGA_C_PBE_REVTPSS, HYB_GGA_XC_B3P86};
    use crate::domain::DerivativeOrder;
    use crate::registry::{Recipe, lookup};

    #[test]
    fn table_is_sorted_by_identifier() {
        assert!(FUNCTIONALS.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[test]
    fn first_order_only_entries_are_flagged() {
        for id in [GGA_C_PBE_REVTPSS, HYB_GGA_XC_B3P86] {
            let descriptor = lookup(id).expect("registered");
            assert!(!descriptor.capabilities.supports(DerivativeOrder::Kernel));
        }
    }

    #[test]
    fn b3p86_weights_sum_to_the_local_complement() {
        let Recipe::Hybrid(recipe) = lookup(HYB_GGA_XC_B3P86).expect("registered").recipe else {
            panic!("b3p86 is a hybrid");
        };
        assert_eq!(recipe.exx, 0.20);
        let exchange = recipe.lda[0].coefficient + recipe.gga[0].coefficient + recipe.exx;
        assert!((exchange - 1.0).abs() < 1.0e-15);
        let correlation = recipe.lda[1].coefficient + recipe.gga[1].coefficient;
        assert!((correlation - 1.0).abs() < 1.0e-15);
    }
}
