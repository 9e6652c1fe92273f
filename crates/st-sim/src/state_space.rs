//! Controllable canonical state-space realization.
//!
//! For a proper `H(s) = (b_0 s^n + ... + b_n) / (s^n + a_1 s^{n-1} + ... + a_n)`:
//!
//!   A = [-a_1  -a_2  ...  -a_n]      B = [1 0 ... 0]^T
//!       [  1     0   ...    0 ]
//!       [  ⋮     ⋱          ⋮ ]      C = [b_1 - b_0 a_1, ..., b_n - b_0 a_n]
//!       [  0    ...    1    0 ]      D = b_0

use nalgebra::{DMatrix, DVector};

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::transfer_function::{TransferFunction, companion};

#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: DVector<f64>,
    pub d: f64,
}

impl StateSpace {
    pub fn from_transfer_function(tf: &TransferFunction) -> SimResult<Self> {
        if !tf.is_proper() {
            return Err(SimError::Improper {
                num: tf.num().len() - 1,
                den: tf.order(),
            });
        }

        let n = tf.order();
        let lead = tf.den()[0];

        // Monic denominator, numerator padded to n+1 coefficients.
        let den: Vec<f64> = tf.den().iter().map(|c| c / lead).collect();
        let mut num = vec![0.0; n + 1 - tf.num().len()];
        num.extend(tf.num().iter().map(|c| c / lead));

        let d = num[0];
        let c = DVector::from_iterator(n, (1..=n).map(|i| num[i] - d * den[i]));
        let mut b = DVector::zeros(n);
        if n > 0 {
            b[0] = 1.0;
        }

        let a = if n > 0 {
            companion(&den)
        } else {
            DMatrix::zeros(0, 0)
        };

        Ok(Self { a, b, c, d })
    }

    pub fn order(&self) -> usize {
        self.b.len()
    }

    pub fn output(&self, x: &DVector<f64>, u: f64) -> f64 {
        self.c.dot(x) + self.d * u
    }

    /// Drive the system with a constant input from rest.
    pub fn with_constant_input(&self, u: f64) -> ForcedResponse<'_> {
        ForcedResponse { system: self, u }
    }
}

/// A state-space system held at a constant input, as a [`TransientModel`].
pub struct ForcedResponse<'a> {
    system: &'a StateSpace,
    u: f64,
}

impl TransientModel for ForcedResponse<'_> {
    type State = DVector<f64>;

    fn initial_state(&self) -> DVector<f64> {
        DVector::zeros(self.system.order())
    }

    fn rhs(&mut self, _t: f64, x: &DVector<f64>) -> SimResult<DVector<f64>> {
        Ok(&self.system.a * x + &self.system.b * self.u)
    }

    fn axpy(&self, x: &DVector<f64>, k: &DVector<f64>, h: f64) -> DVector<f64> {
        x + k * h
    }

    fn output(&self, _t: f64, x: &DVector<f64>) -> f64 {
        self.system.output(x, self.u)
    }
}
