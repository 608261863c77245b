// cf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Mass as UomMass, Pressure as UomPressure,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Pressure = UomPressure;
pub type Volume = UomVolume;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Pipe dimensions are entered in millimetres.
#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

/// Vent and atmospheric pressures are given in bar (absolute).
#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Tolerances, nearly_equal};

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _l = m(622.0);
        let _v = m3(38.0);
        let _a = m2(0.06);
        let _mass = kg(100_000.0);
    }

    #[test]
    fn engineering_units_convert_to_si() {
        let tol = Tolerances::default();
        assert!(nearly_equal(mm(323.8).value, 0.3238, tol));
        assert!(nearly_equal(bar(1.01325).value, 101_325.0, tol));
    }
}
