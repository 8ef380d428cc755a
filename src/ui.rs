use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Focus},
    render::{classify, progress_label, CharClass},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub const TITLE: &str = "Bible Typing Trainer";
pub const SUBTITLE: &str = "Improve your typing skills while reflecting on Scripture";
pub const PLACEHOLDER: &str = "Start typing the verse above...";
pub const FOOTER: &str = "Practice daily to improve your typing speed and accuracy";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let complete = session.is_complete();

        let verse_inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2);
        let verse = verse_paragraph(self, verse_inner_width);
        let verse_lines = verse.line_count(verse_inner_width).max(1) as u16;
        let panel_height = if complete { 4 } else { 1 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),               // title
                Constraint::Length(1),               // padding
                Constraint::Length(2),               // stats bar
                Constraint::Length(verse_lines + 4), // verse + reference
                Constraint::Min(3),                  // input
                Constraint::Length(panel_height),    // completion / controls
                Constraint::Length(1),               // legend
                Constraint::Length(1),               // footer
            ])
            .split(area);

        render_header(chunks[0], buf);
        render_stats(self, chunks[2], buf);
        render_verse(self, verse, verse_lines, chunks[3], buf);
        render_input(self, chunks[4], buf);
        if complete {
            render_completion(self, chunks[5], buf);
        } else {
            render_buttons(self, chunks[5], buf);
        }
        render_legend(self, chunks[6], buf);

        Paragraph::new(Span::styled(FOOTER, italic().add_modifier(Modifier::DIM)))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(Span::styled(TITLE, bold().fg(Color::Magenta))),
        Line::from(Span::styled(SUBTITLE, italic())),
    ])
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn render_stats(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let stats = [
        ("WPM", session.wpm().to_string()),
        ("Accuracy", format!("{}%", session.accuracy())),
        ("Progress", progress_label(session.progress())),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for ((label, value), column) in stats.into_iter().zip(columns.iter()) {
        Paragraph::new(vec![
            Line::from(Span::styled(label, dim_bold())),
            Line::from(Span::styled(value, bold())),
        ])
        .alignment(Alignment::Center)
        .render(*column, buf);
    }
}

fn verse_paragraph(app: &App, width: u16) -> Paragraph<'static> {
    let session = &app.session;
    let green_bold_style = bold().fg(Color::Green);
    let red_bold_style = bold().fg(Color::Red);
    let underlined_dim_bold_style = dim_bold().add_modifier(Modifier::UNDERLINED);

    let classified = classify(session.typed(), session.target());
    let caret = if session.is_complete() {
        None
    } else {
        classified.iter().position(|c| c.class == CharClass::Pending)
    };

    let spans = classified
        .iter()
        .enumerate()
        .map(|(idx, c)| match c.class {
            CharClass::Correct => Span::styled(c.char.to_string(), green_bold_style),
            CharClass::Incorrect => Span::styled(
                match c.char {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            CharClass::Pending if Some(idx) == caret => {
                Span::styled(c.char.to_string(), underlined_dim_bold_style)
            }
            CharClass::Pending => Span::styled(c.char.to_string(), dim_bold()),
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans))
        .alignment(if session.target().width() <= width as usize {
            // a verse that fits on one line reads better centered
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false })
}

fn render_verse(app: &App, verse: Paragraph, verse_lines: u16, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::DIM));
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(verse_lines),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    verse.render(rows[0], buf);

    Paragraph::new(Span::styled(
        app.session.verse().reference,
        italic().fg(Color::Cyan),
    ))
    .alignment(Alignment::Right)
    .render(rows[2], buf);
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let focused = app.focus == Focus::Input && app.input_enabled();
    let title = if app.input_enabled() {
        " Your typing "
    } else {
        " Your typing (read-only) "
    };

    let mut text = if session.typed().is_empty() && app.input_enabled() {
        Text::from(Span::styled(PLACEHOLDER, italic().add_modifier(Modifier::DIM)))
    } else {
        Text::from(session.typed().to_owned())
    };
    if !app.input_enabled() {
        text = text.style(Style::default().add_modifier(Modifier::DIM));
    } else if focused && !session.typed().is_empty() {
        if let Some(last) = text.lines.last_mut() {
            last.push_span(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
        }
    }

    Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_border(focused)),
        )
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn render_buttons(app: &App, area: Rect, buf: &mut Buffer) {
    let buttons_focused = app.focus == Focus::Controls;
    let mut spans = Vec::new();

    for (idx, control) in app.controls().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if buttons_focused && idx == app.selected_control {
            bold().add_modifier(Modifier::REVERSED)
        } else {
            bold()
        };
        spans.push(Span::styled(format!("[ {control} ]"), style));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_completion(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled("Well Done!", bold().fg(Color::Green)))
        .alignment(Alignment::Center)
        .render(rows[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "You completed this verse with {}% accuracy at {} WPM!",
            session.accuracy(),
            session.wpm()
        ),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(rows[1], buf);

    render_buttons(app, rows[3], buf);
}

fn render_legend(app: &App, area: Rect, buf: &mut Buffer) {
    let legend = if app.session.is_complete() {
        "(n)ext verse / (r) try again / ←→ select / (enter) / (esc)ape"
    } else if app.focus == Focus::Controls {
        "←→ select / (enter) activate / (tab) back to typing / (esc)ape"
    } else {
        "(tab) buttons / (ctrl+n) skip / (ctrl+r) reset / (esc)ape"
    };

    Paragraph::new(Span::styled(legend, italic()))
        .alignment(Alignment::Center)
        .render(area, buf);
}
