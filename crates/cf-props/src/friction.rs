//! Darcy friction factor for straight pipe flow.

/// Reynolds number below which flow is treated as laminar.
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl FlowRegime {
    /// Classify by Reynolds number. The switch is sharp; there is no
    /// transitional blend.
    pub fn from_reynolds(reynolds: f64) -> Self {
        if reynolds < LAMINAR_REYNOLDS_LIMIT {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }
}

/// Darcy friction factor: 64/Re when laminar, Haaland's explicit
/// approximation of Colebrook-White when turbulent.
///
/// `relative_roughness` is ε/D.
pub fn darcy_friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    match FlowRegime::from_reynolds(reynolds) {
        FlowRegime::Laminar => 64.0 / reynolds,
        FlowRegime::Turbulent => {
            let inv_sqrt_f =
                -1.8 * ((relative_roughness / 3.7).powf(1.11) + 6.9 / reynolds).log10();
            1.0 / inv_sqrt_f.powi(2)
        }
    }
}
