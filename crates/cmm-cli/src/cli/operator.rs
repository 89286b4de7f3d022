//! Terminal operator: stdout lines, stdin confirmation.

use anyhow::Result;
use cmm_core::service::Operator;
use std::io::{self, BufRead, Write};

pub struct TerminalOperator;

impl TerminalOperator {
    pub fn new() -> Self {
        Self
    }
}

impl Operator for TerminalOperator {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("{prompt} [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES"))
    }

    fn line(&self, msg: &str) {
        println!("{msg}");
    }
}
