//! Activation functions of the recurrent cell

/// Logistic sigmoid `1 / (1 + e^-v)`
pub fn sigmoid(value: f64) -> f64 {
    1.0 / (1.0 + (-value).exp())
}

/// Hyperbolic tangent
pub fn tanh(value: f64) -> f64 {
    value.tanh()
}
