//! SISO transfer functions in polynomial form.
//!
//!   H(s) = (b_0 s^m + ... + b_m) / (a_0 s^n + ... + a_n)
//!
//! Coefficients are stored in descending powers of `s`.

use std::fmt;

use nalgebra::{Complex, DMatrix};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    num: Vec<f64>,
    den: Vec<f64>,
}

impl TransferFunction {
    /// Build from numerator and denominator coefficients (descending powers).
    ///
    /// Leading zeros are stripped. The denominator must keep at least one
    /// non-zero coefficient and every coefficient must be finite.
    pub fn new(num: &[f64], den: &[f64]) -> SimResult<Self> {
        if num.iter().chain(den).any(|c| !c.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "transfer function coefficients must be finite",
            });
        }
        let den = trim_leading_zeros(den);
        if den.is_empty() {
            return Err(SimError::InvalidArg {
                what: "denominator must have a non-zero coefficient",
            });
        }
        let mut num = trim_leading_zeros(num);
        if num.is_empty() {
            num.push(0.0);
        }
        Ok(Self { num, den })
    }

    /// First-order lag `gain / (tau*s + 1)`.
    pub fn first_order_lag(gain: f64, tau: f64) -> SimResult<Self> {
        Self::new(&[gain], &[tau, 1.0])
    }

    pub fn num(&self) -> &[f64] {
        &self.num
    }

    pub fn den(&self) -> &[f64] {
        &self.den
    }

    /// Degree of the denominator.
    pub fn order(&self) -> usize {
        self.den.len() - 1
    }

    pub fn is_proper(&self) -> bool {
        self.num.len() <= self.den.len()
    }

    /// Series connection `self * other`.
    pub fn series(&self, other: &TransferFunction) -> SimResult<Self> {
        Self::new(
            &poly_mul(&self.num, &other.num),
            &poly_mul(&self.den, &other.den),
        )
    }

    /// Close the loop with unity negative feedback: `G / (1 + G)`.
    pub fn feedback_unity(&self) -> SimResult<Self> {
        let den = poly_add(&self.den, &self.num);
        if trim_leading_zeros(&den).is_empty() {
            return Err(SimError::InvalidArg {
                what: "closed-loop denominator vanishes (G = -1)",
            });
        }
        Self::new(&self.num, &den)
    }

    /// `H(0)`, or `None` when the denominator has a root at the origin.
    pub fn dc_gain(&self) -> Option<f64> {
        let den0 = *self.den.last()?;
        if den0 == 0.0 {
            return None;
        }
        let num0 = self.num.last().copied().unwrap_or(0.0);
        Some(num0 / den0)
    }

    /// Evaluate `H(s)` at a complex frequency.
    pub fn eval(&self, s: Complex<f64>) -> Complex<f64> {
        poly_eval(&self.num, s) / poly_eval(&self.den, s)
    }

    /// Roots of the denominator, from the eigenvalues of its companion matrix.
    pub fn poles(&self) -> Vec<Complex<f64>> {
        let n = self.order();
        if n == 0 {
            return Vec::new();
        }
        companion(&self.den)
            .complex_eigenvalues()
            .iter()
            .copied()
            .collect()
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = format_poly(&self.num);
        let den = format_poly(&self.den);
        let width = num.len().max(den.len());
        writeln!(f, "{:^width$}", num)?;
        writeln!(f, "{}", "-".repeat(width))?;
        write!(f, "{:^width$}", den)
    }
}

/// Companion matrix of a polynomial (top-row form), normalized to monic.
pub(crate) fn companion(poly: &[f64]) -> DMatrix<f64> {
    let n = poly.len() - 1;
    let lead = poly[0];
    let mut a = DMatrix::zeros(n, n);
    for j in 0..n {
        a[(0, j)] = -poly[j + 1] / lead;
    }
    for i in 1..n {
        a[(i, i - 1)] = 1.0;
    }
    a
}

fn trim_leading_zeros(poly: &[f64]) -> Vec<f64> {
    match poly.iter().position(|&c| c != 0.0) {
        Some(first) => poly[first..].to_vec(),
        None => Vec::new(),
    }
}

fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Add two polynomials aligned on their constant terms.
fn poly_add(a: &[f64], b: &[f64]) -> Vec<f64> {
    let len = a.len().max(b.len());
    let mut out = vec![0.0; len];
    for (i, &c) in a.iter().enumerate() {
        out[len - a.len() + i] += c;
    }
    for (i, &c) in b.iter().enumerate() {
        out[len - b.len() + i] += c;
    }
    out
}

fn poly_eval(poly: &[f64], s: Complex<f64>) -> Complex<f64> {
    poly.iter()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * s + c)
}

fn format_poly(poly: &[f64]) -> String {
    let degree = poly.len().saturating_sub(1);
    let terms: Vec<String> = poly
        .iter()
        .enumerate()
        .filter(|(_, c)| **c != 0.0)
        .map(|(i, &c)| match degree - i {
            0 => format!("{:.4}", c),
            1 => format!("{:.4}s", c),
            p => format!("{:.4}s^{}", c, p),
        })
        .collect();
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}
