//! Interactive questions for the user-parameter run.

use std::io::{BufRead, Write};

use st_app::{AppError, AppResult, UserRequest};
use st_controls::TuningMethod;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> AppResult<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn ask_number(&mut self, field: &'static str, question: &str) -> AppResult<f64> {
        let answer = self.ask(question)?;
        answer
            .parse::<f64>()
            .map_err(|_| AppError::InvalidInput {
                field,
                value: answer,
            })
    }

    /// Method, K, tau, theta and setpoint, in that order. Numbers are
    /// parsed as they arrive; the method is checked once all answers are in.
    pub fn ask_user_request(&mut self) -> AppResult<UserRequest> {
        let method = self.ask("\nTuning method (Ziegler-Nichols: zn, Cohen-Coon: co): ")?;
        let k = self.ask_number("K", "K: ")?;
        let tau = self.ask_number("tau", "tau: ")?;
        let theta = self.ask_number("theta", "theta: ")?;
        let setpoint = self.ask_number("setpoint", "setpoint: ")?;

        let method = parse_method(&method)?;
        Ok(UserRequest {
            method,
            k,
            tau,
            theta,
            setpoint,
        })
    }
}

/// Method selector, with an unknown code reported as an invalid choice.
pub fn parse_method(code: &str) -> AppResult<TuningMethod> {
    code.parse::<TuningMethod>()
        .map_err(|e| AppError::InvalidChoice(e.to_string()))
}
