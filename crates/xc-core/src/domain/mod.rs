pub mod errors;

pub use errors::{CompatibilityExitPlaceholder, XcError, XcErrorCategory, XcResult};

use serde::Serialize;
use std::fmt::{Display, Formatter};

pub type FunctionalId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalKind {
    Exchange,
    Correlation,
    ExchangeCorrelation,
}

impl FunctionalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exchange => "exchange",
            Self::Correlation => "correlation",
            Self::ExchangeCorrelation => "exchange-correlation",
        }
    }
}

impl Display for FunctionalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Lda,
    Gga,
    HybridGga,
    MetaGga,
}

impl Family {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lda => "LDA",
            Self::Gga => "GGA",
            Self::HybridGga => "hybrid GGA",
            Self::MetaGga => "meta-GGA",
        }
    }

    /// Whether points of this family carry squared-gradient contractions.
    pub const fn needs_gradient(self) -> bool {
        !matches!(self, Self::Lda)
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPolarization {
    #[default]
    Unpolarized,
    Polarized,
}

impl SpinPolarization {
    pub const fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Unpolarized),
            2 => Some(Self::Polarized),
            _ => None,
        }
    }

    pub const fn channels(self) -> usize {
        match self {
            Self::Unpolarized => 1,
            Self::Polarized => 2,
        }
    }

    pub const fn layout(self) -> GridLayout {
        match self {
            Self::Unpolarized => GridLayout {
                rho: 1,
                sigma: 1,
                v2rho2: 1,
                v2rhosigma: 1,
                v2sigma2: 1,
            },
            Self::Polarized => GridLayout {
                rho: 2,
                sigma: 3,
                v2rho2: 3,
                v2rhosigma: 6,
                v2sigma2: 6,
            },
        }
    }
}

/// Per-point strides of the host arrays. `vrho` and `vsigma` share the
/// strides of `rho` and `sigma`; `zk` is always one value per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rho: usize,
    pub sigma: usize,
    pub v2rho2: usize,
    pub v2rhosigma: usize,
    pub v2sigma2: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DerivativeOrder {
    #[default]
    Energy,
    Potential,
    Kernel,
}

impl DerivativeOrder {
    pub const ALL: [Self; 3] = [Self::Energy, Self::Potential, Self::Kernel];

    pub fn from_u8(order: u8) -> XcResult<Self> {
        match order {
            0 => Ok(Self::Energy),
            1 => Ok(Self::Potential),
            2 => Ok(Self::Kernel),
            _ => Err(XcError::InvalidOrder { order }),
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Energy => 0,
            Self::Potential => 1,
            Self::Kernel => 2,
        }
    }

    pub const fn first(self) -> bool {
        !matches!(self, Self::Energy)
    }

    pub const fn second(self) -> bool {
        matches!(self, Self::Kernel)
    }
}

impl Display for DerivativeOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Capabilities {
    pub exc: bool,
    pub vxc: bool,
    pub fxc: bool,
}

impl Capabilities {
    pub const EXC_VXC: Self = Self {
        exc: true,
        vxc: true,
        fxc: false,
    };
    pub const EXC_VXC_FXC: Self = Self {
        exc: true,
        vxc: true,
        fxc: true,
    };

    pub const fn supports(self, order: DerivativeOrder) -> bool {
        match order {
            DerivativeOrder::Energy => self.exc,
            DerivativeOrder::Potential => self.exc && self.vxc,
            DerivativeOrder::Kernel => self.exc && self.vxc && self.fxc,
        }
    }

    pub const fn max_order(self) -> Option<DerivativeOrder> {
        if self.supports(DerivativeOrder::Kernel) {
            Some(DerivativeOrder::Kernel)
        } else if self.supports(DerivativeOrder::Potential) {
            Some(DerivativeOrder::Potential)
        } else if self.supports(DerivativeOrder::Energy) {
            Some(DerivativeOrder::Energy)
        } else {
            None
        }
    }
}
