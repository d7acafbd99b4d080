//! Human-readable report: parameters, states, adjacency, transitions,
//! diagram and the numeric generator matrix.

use std::io::{self, Write};

use super::diagram::write_diagram;
use crate::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter};
use crate::model::{Model, State, TransitionCategory};

const RULE_WIDTH: usize = 100;

/// Terminal report writer
pub struct TerminalWriter {
    formatter: ColoredFormatter,
}

impl TerminalWriter {
    pub fn new(config: FormattingConfig) -> Self {
        Self {
            formatter: ColoredFormatter::new(config),
        }
    }

    fn config(&self) -> &FormattingConfig {
        self.formatter.config()
    }

    pub fn write<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        let sections: [fn(&Self, &Model, &mut W) -> io::Result<()>; 7] = [
            Self::write_parameters,
            Self::write_states,
            Self::write_adjacency,
            Self::write_transitions,
            Self::write_diagram,
            Self::write_generator,
            Self::write_legend,
        ];

        self.banner(out, "CONTINUOUS-TIME MARKOV CHAIN OF THE M/H₂/1/2 SYSTEM")?;
        for section in sections {
            section(self, model, out)?;
        }
        Ok(())
    }

    fn banner<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        let rule: String = std::iter::repeat(self.config().rule_char())
            .take(RULE_WIDTH)
            .collect();
        writeln!(out, "{}", rule)?;
        writeln!(out, "  {}", self.formatter.header(title))?;
        writeln!(out, "{}", rule)?;
        writeln!(out)
    }

    fn subheader<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        writeln!(out, "{}", self.formatter.header(title))?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))
    }

    pub fn write_parameters<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        let p = &model.parameters;
        let r = &model.rates;

        self.subheader(out, "SYSTEM PARAMETERS")?;
        writeln!(out, "  λ  = {} jobs/s", p.lambda)?;
        writeln!(out, "  B  = {} s (mean service time)", p.mean_service_time)?;
        writeln!(out, "  V  = {} (coefficient of variation)", p.coefficient_of_variation)?;
        writeln!(out, "  q  = {:.4}", p.phase1_probability)?;
        writeln!(out, "  λ₁ = q × λ = {:.4} (arrivals starting phase 1)", r.lambda1)?;
        writeln!(out, "  λ₂ = (1-q) × λ = {:.4} (arrivals starting phase 2)", r.lambda2)?;
        writeln!(out, "  b₁' = {:.4}, μ₁ = {:.6} (phase 1 rate)", r.phase1_mean, r.mu1)?;
        writeln!(out, "  b₂' = {:.4}, μ₂ = {:.6} (phase 2 rate)", r.phase2_mean, r.mu2)?;
        writeln!(out)
    }

    pub fn write_states<W: Write>(&self, _model: &Model, out: &mut W) -> io::Result<()> {
        self.subheader(out, "SYSTEM STATES (N, φ)")?;
        writeln!(out, "N - number of jobs in the system (including the one in service)")?;
        writeln!(out, "φ - service phase (1 or 2)")?;
        writeln!(out)?;
        for state in State::ALL {
            writeln!(
                out,
                "  {}: {:6} - {}",
                self.formatter.highlight(state.id()),
                state.notation(),
                state.description()
            )?;
        }
        writeln!(out)
    }

    pub fn write_adjacency<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        let (present, absent) = self.config().markers();

        self.subheader(out, "ADJACENCY MATRIX (1 = transition exists, 0 = none)")?;
        write!(out, "      ")?;
        for state in State::ALL {
            write!(out, " {} ", state.id())?;
        }
        writeln!(out)?;

        for from in State::ALL {
            write!(out, "  {}  ", from.id())?;
            for to in State::ALL {
                let symbol = if model.adjacency.has_edge(from, to) {
                    self.formatter.success(present)
                } else {
                    self.formatter.dim(absent)
                };
                write!(out, "  {}  ", symbol)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
        writeln!(out, "  Transitions: {}", model.adjacency.edge_count())?;
        writeln!(out)
    }

    pub fn write_transitions<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        let arrow = self.config().arrow();

        self.subheader(out, "ALL TRANSITIONS WITH RATES")?;
        for from in State::ALL {
            let outgoing: Vec<_> = model.transitions_from(from).collect();
            if outgoing.is_empty() {
                continue;
            }
            writeln!(out, "FROM {} {} {}", from.id(), from.notation(), arrow)?;
            for t in outgoing {
                writeln!(
                    out,
                    "   {} {} {}: {:.6}  ({})",
                    arrow,
                    t.to.id(),
                    t.to.notation(),
                    t.rate,
                    transition_label(t.category, model)
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn write_diagram<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        self.subheader(out, "TRANSITION GRAPH")?;
        write_diagram(model, self.config().ascii_only, out)?;
        writeln!(out)
    }

    pub fn write_generator<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        self.subheader(out, "TRANSITION RATE MATRIX Q")?;
        write!(out, "       ")?;
        for state in State::ALL {
            write!(out, "    {}   ", state.id())?;
        }
        writeln!(out)?;

        let (_, absent) = self.config().markers();
        for from in State::ALL {
            write!(out, "  {}  ", from.id())?;
            for &rate in model.generator.row(from) {
                write!(out, " {}", format_cell(rate, absent))?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        let worst = State::ALL
            .iter()
            .map(|&s| model.generator.row_sum(s).abs())
            .fold(0.0_f64, f64::max);
        writeln!(out, "  Max |row sum|: {:.2e}", worst)?;
        writeln!(out)
    }

    pub fn write_legend<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        let r = &model.rates;

        self.subheader(out, "LEGEND")?;
        writeln!(out, "  λ₁ = {:.4}   - arrival, service starts in phase 1", r.lambda1)?;
        writeln!(out, "  λ₂ = {:.4}   - arrival, service starts in phase 2", r.lambda2)?;
        writeln!(out, "  μ₁ = {:.4}   - completion of phase 1", r.mu1)?;
        writeln!(out, "  μ₂ = {:.4}   - completion of phase 2", r.mu2)?;
        writeln!(out, "  q  = {:.4}   - probability of choosing phase 1", r.q)?;
        writeln!(out)?;
        writeln!(out, "  * An arriving job starts phase 1 with probability q, phase 2 with 1-q")?;
        writeln!(out, "  * A job leaves the system when its phase completes")?;
        writeln!(out, "  * The next queued job starts phase 1 with probability q")?;
        writeln!(out, "  * In S5 and S6 (queue full) arriving jobs are lost")?;
        writeln!(out)
    }
}

/// Label shown next to a transition in the list, e.g. `μ₁×q=0.0033`
pub fn transition_label(category: TransitionCategory, model: &Model) -> String {
    category.label(&model.rates, 4)
}

/// Fixed-width matrix cell; exact zeros print as the absent marker
fn format_cell(rate: f64, absent: &str) -> String {
    if rate == 0.0 {
        format!("{:^9}", absent)
    } else {
        format!("{:9.5}", rate)
    }
}

/// Render the full report to a string
pub fn render(model: &Model, config: FormattingConfig) -> io::Result<String> {
    let mut buffer = Vec::new();
    TerminalWriter::new(config).write(model, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_model, Parameters};

    fn plain_report() -> String {
        let model = build_model(&Parameters::default()).unwrap();
        render(&model, FormattingConfig::plain()).unwrap()
    }

    #[test]
    fn test_report_has_all_sections() {
        let report = plain_report();
        for section in [
            "SYSTEM PARAMETERS",
            "SYSTEM STATES",
            "ADJACENCY MATRIX",
            "ALL TRANSITIONS WITH RATES",
            "TRANSITION GRAPH",
            "TRANSITION RATE MATRIX Q",
            "LEGEND",
        ] {
            assert!(report.contains(section), "missing section {section}");
        }
    }

    #[test]
    fn test_transition_lines_carry_labels() {
        let report = plain_report();
        assert!(report.contains("FROM S0 (0,-) ->"));
        assert!(report.contains("-> S1 (1,1): 0.100000  (λ₁=0.1000)"));
        assert!(report.contains("-> S2 (1,2): 0.600000  (λ₂=0.6000)"));
        assert!(report.contains("(μ₁×q=0.0033)"));
        assert!(report.contains("(μ₂×(1-q)=0.1974)"));
    }

    #[test]
    fn test_adjacency_marker_count() {
        let report = plain_report();
        let section: String = report
            .split("ADJACENCY MATRIX")
            .nth(1)
            .and_then(|rest| rest.split("Transitions:").next())
            .unwrap()
            .to_string();
        assert_eq!(section.matches('*').count(), 20);
        assert!(report.contains("Transitions: 20"));
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(0.0, "."), "    .    ");
        assert_eq!(format_cell(-0.7, "."), " -0.70000");
        assert_eq!(format_cell(0.1, "."), "  0.10000");
    }
}
