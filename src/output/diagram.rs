//! ASCII drawing of the transition graph, one row of boxes per queue level.
//!
//! Under each level every state lists its outgoing edges: `↓` for arrivals
//! (one level down the drawing), `↑` for completions.

use std::io::{self, Write};

use crate::model::{Model, State, CAPACITY};

const BOX_INNER: usize = 12;
const LEFT_MARGIN: usize = 12;

struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    down: &'static str,
    up: &'static str,
    arrow: &'static str,
}

const UNICODE: Glyphs = Glyphs {
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    horizontal: '─',
    vertical: '│',
    down: "↓",
    up: "↑",
    arrow: "→",
};

const ASCII: Glyphs = Glyphs {
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    horizontal: '-',
    vertical: '|',
    down: "v",
    up: "^",
    arrow: "->",
};

fn states_at_level(jobs: u8) -> Vec<State> {
    State::ALL
        .into_iter()
        .filter(|s| s.jobs() == jobs)
        .collect()
}

fn level_caption(jobs: u8) -> String {
    match jobs {
        0 => "N=0 empty".to_string(),
        n if n == CAPACITY => format!("N={n} full"),
        n => format!("N={n}"),
    }
}

fn write_boxes<W: Write>(g: &Glyphs, jobs: u8, states: &[State], out: &mut W) -> io::Result<()> {
    let horizontal: String = std::iter::repeat(g.horizontal).take(BOX_INNER).collect();
    let gap = "   ";

    let top: Vec<String> = states
        .iter()
        .map(|_| format!("{}{}{}", g.top_left, horizontal, g.top_right))
        .collect();
    let bottom: Vec<String> = states
        .iter()
        .map(|_| format!("{}{}{}", g.bottom_left, horizontal, g.bottom_right))
        .collect();
    let cell = |text: String| format!("{}{:^width$}{}", g.vertical, text, g.vertical, width = BOX_INNER);

    writeln!(
        out,
        "{:<margin$}{}",
        level_caption(jobs),
        top.join(gap),
        margin = LEFT_MARGIN
    )?;
    for row in [
        states.iter().map(|s| cell(s.id().to_string())).collect::<Vec<_>>(),
        states.iter().map(|s| cell(s.notation())).collect(),
        states.iter().map(|s| cell(s.short_tag())).collect(),
    ] {
        writeln!(out, "{:<margin$}{}", "", row.join(gap), margin = LEFT_MARGIN)?;
    }
    writeln!(out, "{:<margin$}{}", "", bottom.join(gap), margin = LEFT_MARGIN)
}

fn write_edges<W: Write>(g: &Glyphs, model: &Model, states: &[State], out: &mut W) -> io::Result<()> {
    for &state in states {
        let edges: Vec<String> = model
            .transitions_from(state)
            .map(|t| {
                let direction = if t.category.is_arrival() { g.down } else { g.up };
                format!(
                    "{} {} {} {}",
                    direction,
                    t.category.label(&model.rates, 4),
                    g.arrow,
                    t.to.id()
                )
            })
            .collect();
        if edges.is_empty() {
            continue;
        }
        writeln!(
            out,
            "{:<margin$}{}: {}",
            "",
            state.id(),
            edges.join("   "),
            margin = LEFT_MARGIN
        )?;
    }
    Ok(())
}

/// Draw the graph level by level; `ascii_only` avoids box-drawing glyphs
pub fn write_diagram<W: Write>(model: &Model, ascii_only: bool, out: &mut W) -> io::Result<()> {
    let g = if ascii_only { &ASCII } else { &UNICODE };

    for jobs in 0..=CAPACITY {
        let states = states_at_level(jobs);
        write_boxes(g, jobs, &states, out)?;
        write_edges(g, model, &states, out)?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "{:<margin$}Arrivals in S5/S6 are lost (no transition).",
        "",
        margin = LEFT_MARGIN
    )
}
