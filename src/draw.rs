use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::scorecard::{
    BATTING_HEADER, BOWLING_HEADER, CARD_SLOTS, batting_rows, bowling_rows, extras_line, headline,
};
use crate::state::entry::{EntryForm, Field, OutChoice};
use crate::ui::layout::LayoutAreas;
use scorebook::{Extra, Scorecard};

const HELP_TEXT: &str = "\
Entry form
  Tab / Down        next field
  Shift-Tab / Up    previous field
  Left / Right      change runs, extra type, out, how out
  0-6               set the focused runs field
  type / Backspace  edit a name

Scoring
  Enter             score the ball
  F5 / Ctrl-O       over bowled (batters change ends)
  Ctrl-S            swap strike
  Ctrl-N            close innings and start the next

View
  PgUp / PgDn       previous / next innings
  F1                help     F11  full screen     F12  logs
  Ctrl-C / Ctrl-Q   quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Scoring => draw_scoring(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
    });
    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;
    let game = &app.state.game;

    let titles: Vec<Line> = (0..game.innings_count())
        .map(|i| {
            if i == game.live_index() {
                Line::from(format!("Innings {} (live)", i + 1))
            } else {
                Line::from(format!("Innings {}", i + 1))
            }
        })
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .title(format!(" {} ", game.title)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(game.viewing)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: F1 ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_scoring(f: &mut Frame, area: Rect, app: &App) {
    let [entry_area, card_area] = LayoutAreas::split_main(area);
    draw_entry(f, entry_area, app);
    draw_card(f, card_area, app);
}

fn draw_entry(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.state.replaying {
        " Ball (replaying) "
    } else {
        " Ball "
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [form_area, preview_area, status_area, legend_area] = Layout::vertical([
        Constraint::Length(Field::ALL.len() as u16),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let entry = &app.state.entry;
    let lines: Vec<Line> = Field::ALL
        .iter()
        .map(|field| entry_line(entry, *field))
        .collect();
    f.render_widget(Paragraph::new(lines), form_area);

    let preview = Paragraph::new(entry.to_ball().to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::TOP).title(" Preview "));
    f.render_widget(preview, preview_area);

    let mut status = Vec::new();
    if let Some(err) = app.state.last_error.as_deref() {
        status.push(Line::styled(err.to_string(), Style::default().fg(Color::Red)));
    }
    if let Some(msg) = app.state.status.as_deref() {
        status.push(Line::styled(msg.to_string(), Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), status_area);

    f.render_widget(
        Paragraph::new("Enter=score  F5=over  ^N=innings")
            .style(Style::default().fg(Color::DarkGray)),
        legend_area,
    );
}

fn entry_line(entry: &EntryForm, field: Field) -> Line<'static> {
    let focused = entry.focus == field;
    let disabled = match field {
        Field::ExtraRuns => entry.extra_type == Extra::NoExtra,
        Field::HowOut | Field::Fielder => entry.out == OutChoice::Nobody,
        _ => false,
    };

    let mut value = entry.value(field);
    if focused && field.is_text() {
        value.push('_');
    } else if focused {
        value = format!("< {value} >");
    }

    let value_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(
            format!("{:<12}", field.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(value, value_style),
    ])
}

fn draw_card(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let card = game.viewed();
    let title = if card.closed {
        format!(" Innings {} (closed) ", game.viewing + 1)
    } else {
        format!(" Innings {} ", game.viewing + 1)
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let table_height = CARD_SLOTS as u16 + 1;
    let [score_area, batting_area, bowling_area, extras_area, history_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(table_height),
        Constraint::Length(table_height + 1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(headline(card)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        score_area,
    );

    draw_batting(f, batting_area, card);
    draw_bowling(f, bowling_area, card, app.settings.balls_per_over);

    f.render_widget(Paragraph::new(extras_line(card)), extras_area);
    draw_history(f, history_area, card);
}

fn header_row(cells: [&'static str; 7]) -> Row<'static> {
    Row::new(cells).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::UNDERLINED),
    )
}

fn draw_batting(f: &mut Frame, area: Rect, card: &Scorecard) {
    let rows = batting_rows(card).into_iter().map(Row::new);
    let widths = [
        Constraint::Length(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
    ];
    f.render_widget(
        Table::new(rows, widths).header(header_row(BATTING_HEADER)),
        area,
    );
}

fn draw_bowling(f: &mut Frame, area: Rect, card: &Scorecard, balls_per_over: u8) {
    let rows = bowling_rows(card, balls_per_over).into_iter().map(Row::new);
    let widths = [
        Constraint::Length(3),
        Constraint::Fill(3),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Length(5),
    ];
    f.render_widget(
        Table::new(rows, widths)
            .header(header_row(BOWLING_HEADER))
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn draw_history(f: &mut Frame, area: Rect, card: &Scorecard) {
    let lines: Vec<Line> = card
        .last_six()
        .into_iter()
        .map(|l| Line::from(l.to_string()))
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .title(" Recent history "),
        ),
        area,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help (Esc to close) ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Gray)),
        area,
    );
}
