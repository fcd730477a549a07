//! `stepline reduce`: show the PID loop reduction

use anyhow::Result;

use stepline_control::reduce_pid_loop;

use crate::config::StepConfig;

pub fn render(config: &StepConfig) -> Result<String> {
    let steps = reduce_pid_loop(config.gains(), config.plant()?);
    let mut out = String::new();
    for step in &steps {
        let tf = &step.transfer;
        out.push_str(&format!("{:<9} = {}\n", step.label, tf));
        out.push_str(&format!("{:<9}   num: {:?}\n", "", tf.numerator().coeffs()));
        out.push_str(&format!("{:<9}   den: {:?}\n", "", tf.denominator().coeffs()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_step_with_coefficients() {
        let text = render(&StepConfig::default()).unwrap();
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| !l.trim_start().starts_with("num") && !l.trim_start().starts_with("den"))
            .collect();
        assert_eq!(headers.len(), 4);
        assert!(headers[0].starts_with("C(s)"));
        assert!(headers[3].starts_with("T(s)      = (4s) / (s^3 + 2s^2 + 8s)"));
        assert!(text.contains("den: [1.0, 2.0, 8.0, 0.0]"));
    }
}
