use std::io::{self, Write};

use crossterm::style::{self, Stylize as _};
use mastermind_engine::{Code, Color, Feedback, GameSession};

const PEG: &str = "O";

/// Terminal color of a peg; colors without a name are printed as numbers.
const fn peg_color(color: Color) -> Option<style::Color> {
    match color {
        1 => Some(style::Color::Green),
        2 => Some(style::Color::Yellow),
        3 => Some(style::Color::Blue),
        4 => Some(style::Color::Magenta),
        5 => Some(style::Color::Cyan),
        6 => Some(style::Color::White),
        7 => Some(style::Color::Red),
        _ => None,
    }
}

fn write_code<W>(out: &mut W, code: &Code) -> io::Result<()>
where
    W: Write + ?Sized,
{
    for (i, &color) in code.colors().iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        match peg_color(color) {
            Some(term_color) => write!(out, "{}", PEG.with(term_color).bold())?,
            None => write!(out, "{color}")?,
        }
    }
    Ok(())
}

fn write_feedback<W>(out: &mut W, feedback: Feedback) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let markers = format!(
        "{}{}",
        "C".repeat(usize::from(feedback.correct)),
        "M".repeat(usize::from(feedback.misplaced))
    );
    write!(out, "{}", markers.white())
}

/// Colored counterpart of the plain session rendering.
pub fn write_session<W>(out: &mut W, session: &GameSession) -> io::Result<()>
where
    W: Write + ?Sized,
{
    write!(out, "Code:   ")?;
    write_code(out, session.code())?;
    writeln!(out)?;
    for (i, turn) in session.turns().iter().enumerate() {
        write!(out, "Turn {}: ", i + 1)?;
        write_code(out, &turn.guess)?;
        write!(out, " ")?;
        write_feedback(out, turn.feedback)?;
        writeln!(out)?;
    }
    let outcome = if session.state().is_solved() {
        "solved".green()
    } else {
        "not solved".red()
    };
    writeln!(out, "=> {outcome}")
}

/// Named colors of the configuration, e.g. for a legend line.
pub fn write_legend<W>(out: &mut W, n_colors: Color) -> io::Result<()>
where
    W: Write + ?Sized,
{
    write!(out, "Colors:")?;
    for color in 1..=n_colors {
        match peg_color(color) {
            Some(term_color) => write!(out, " {color}={}", PEG.with(term_color).bold())?,
            None => write!(out, " {color}")?,
        }
    }
    writeln!(out)
}
