use cadence::{Phase, StartPolicy, TestSession, TimeSource};
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Style, Stylize},
    text::{Line, Span, ToLine},
    widgets::{Padding, Paragraph},
};

use crate::config::Theme;
use crate::utils::{ROUNDED_BLOCK, center};

/// Header, blank, three rows, blank, statistics
const CONTENT_HEIGHT: u16 = 7;

/// Draws the whole screen
pub fn draw(frame: &mut Frame, session: &TestSession, theme: &Theme) {
    let help_text = help(session.phase());
    let block = ROUNDED_BLOCK
        .padding(Padding::new(1, 1, 0, 0))
        .title_top("STT".to_line().bold().centered())
        .title_top(
            help_text
                .to_line()
                .fg(theme.highlight)
                .right_aligned(),
        );

    let area = frame.area();
    let content = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![header(session).centered(), Line::default()];
    lines.extend(
        session
            .row_window()
            .slots
            .iter()
            .map(|slot| slot.map_or_else(Line::default, |row| row_line(session, row, theme))),
    );
    lines.push(Line::default());
    lines.push(footer(session).centered());

    let width = lines.iter().map(Line::width).max().unwrap_or_default();
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let area = center(
        content,
        Constraint::Length(width),
        Constraint::Length(CONTENT_HEIGHT),
    );

    frame.render_widget(Paragraph::new(lines), area);
}

/// Key hints for the current phase
const fn help(phase: Phase) -> &'static str {
    match phase {
        Phase::Ended | Phase::Aborted => "<ESC> to exit",
        Phase::NotStarted | Phase::Running => "<ESC> to quit",
    }
}

/// Timer, plus a hint on how to start before the test runs
pub fn header(session: &TestSession) -> Line<'static> {
    let seconds = session
        .remaining_seconds()
        .unwrap_or_else(|| session.elapsed_seconds());

    match session.phase() {
        Phase::NotStarted => {
            let hint = match session.start_policy() {
                StartPolicy::FirstKeystroke => "start typing to start the test",
                StartPolicy::MatchingFirstCharacter => "type the first letter to start the test",
                StartPolicy::Explicit => "press <ENTER> to start the test",
            };
            Line::from(format!("{seconds}s - {hint}"))
        }
        Phase::Running => Line::from(format!("{seconds}s")),
        Phase::Ended | Phase::Aborted => {
            Line::from(format!("finished after {}s", session.elapsed_seconds())).bold()
        }
    }
}

/// One row of the text, each character styled by its status.
///
/// The cursor is underlined until the test ends.
pub fn row_line<T: TimeSource>(
    session: &TestSession<T>,
    row: usize,
    theme: &Theme,
) -> Line<'static> {
    let show_cursor = !session.is_ended();
    let mut spans = Vec::new();

    for context in session.render_row(row) {
        let status = context.character.status;
        let style = if context.has_cursor && show_cursor {
            theme.cursor_style(status)
        } else {
            theme.style_for(status)
        };

        spans.push(Span::styled(context.character.as_char().to_string(), style));
        if context.ends_word {
            spans.push(Span::styled(" ", Style::new()));
        }
    }

    Line::from(spans)
}

/// Speed so far, or the final result
pub fn footer<T: TimeSource>(session: &TestSession<T>) -> Line<'static> {
    session
        .current_stats()
        .map(|stats| stats.to_string())
        .unwrap_or_default()
        .into()
}
