//! Parameter layouts for the model family.
//!
//! Each model variant consumes a theta vector with a fixed layout:
//!
//! | variant                | theta                          |
//! |------------------------|--------------------------------|
//! | `OneTimescale`         | `[tau]`                        |
//! | `OneTimescaleAndOsc`   | `[tau, frequency, coefficient]`|
//! | `TwoTimescales`        | `[tau1, tau2, coefficient]`    |
//!
//! `coefficient` is a mixing weight in `[0, 1]`: the share of variance
//! carried by the oscillation (or by the first timescale).

/// `ModelKind` — tag selecting the generative process and theta layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Single OU process.
    OneTimescale,
    /// OU process plus an additive random-phase oscillation.
    OneTimescaleAndOsc,
    /// Mixture of two independent OU processes.
    TwoTimescales,
}

/// Domain of a single theta entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDomain {
    /// Finite and strictly positive timescale.
    Timescale,
    /// Finite, strictly positive, and below the Nyquist frequency.
    Frequency,
    /// Mixing weight in `[0, 1]`.
    Coefficient,
}

impl ModelKind {
    /// Number of free parameters.
    pub const fn n_params(&self) -> usize {
        match self {
            ModelKind::OneTimescale => 1,
            ModelKind::OneTimescaleAndOsc | ModelKind::TwoTimescales => 3,
        }
    }

    /// Parameter names in theta order.
    pub const fn param_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::OneTimescale => &["tau"],
            ModelKind::OneTimescaleAndOsc => &["tau", "frequency", "coefficient"],
            ModelKind::TwoTimescales => &["tau1", "tau2", "coefficient"],
        }
    }

    /// Parameter domains in theta order.
    pub const fn param_domains(&self) -> &'static [ParamDomain] {
        match self {
            ModelKind::OneTimescale => &[ParamDomain::Timescale],
            ModelKind::OneTimescaleAndOsc => {
                &[ParamDomain::Timescale, ParamDomain::Frequency, ParamDomain::Coefficient]
            }
            ModelKind::TwoTimescales => {
                &[ParamDomain::Timescale, ParamDomain::Timescale, ParamDomain::Coefficient]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_are_consistent() {
        for kind in
            [ModelKind::OneTimescale, ModelKind::OneTimescaleAndOsc, ModelKind::TwoTimescales]
        {
            assert_eq!(kind.param_names().len(), kind.n_params());
            assert_eq!(kind.param_domains().len(), kind.n_params());
        }
    }
}
