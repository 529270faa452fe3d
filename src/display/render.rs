// Frame rendering with ratatui

use crate::app::{App, Section};
use crate::config::ConfigField;
use crate::display::formatters::{format_field_value, format_rotation, slider_track};
use crate::display::layout::{centered_rect, screen_areas, GridLayout};
use crate::grid::{CellDisplay, FallMode, GridTrait};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Frame background the translucent squares are blended over
pub const BACKGROUND_RGB: (u8, u8, u8) = (17, 24, 39);
const LABEL: &str = "FOG";

pub fn render_app(f: &mut Frame, app: &App) {
    let areas = screen_areas(f.area(), app.section != Section::Hidden);

    render_header(f, areas.header, app);
    render_grid(f, areas.grid, app);
    if let Some(panel) = areas.panel {
        render_panel(f, panel, app);
    }
    render_footer(f, areas.footer);

    if app.show_help {
        render_help(f);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let dims = app.animator.dimensions();
    let mode = match app.animator.mode() {
        FallMode::Wired => "wired",
        FallMode::Classic => "classic",
    };
    let sizing = if app.follow_viewport { "viewport" } else { "sliders" };

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "▦ Falling Squares",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format_rotation(app.animator.rotation()), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{}x{} @ {}px", dims.cols, dims.rows, dims.square_size),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!("  size: {}  mode: {}  ", sizing, mode)),
            Span::styled(app.monitor.summary(), Style::default().fg(Color::DarkGray)),
        ]),
    ])
    .block(Block::default().borders(Borders::BOTTOM));

    f.render_widget(header, area);
}

fn render_grid(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        area,
    );

    let layout = GridLayout::compute(area, app.animator.dimensions(), app.config.cell_px());
    if layout.frame.width == 0 || layout.frame.height == 0 {
        let msg = Paragraph::new("Empty grid")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(msg, area);
        return;
    }

    let (r, g, b) = BACKGROUND_RGB;
    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Rgb(r, g, b)));
    f.render_widget(frame_block, layout.outer());

    // resting cells first so falling squares paint over their marks
    if app.config.display.show_grid_lines {
        for (row, cells) in app.animator.rows_iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_visible() {
                    continue;
                }
                if let Some(slot) = layout.square_rect(row, col) {
                    let mark = Paragraph::new(cell.glyph().to_string())
                        .style(Style::default().fg(Color::DarkGray));
                    f.render_widget(mark, Rect { width: 1, height: 1, ..slot });
                }
            }
        }
    }

    for (row, cells) in app.animator.rows_iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if !cell.is_visible() {
                continue;
            }
            let Some(rect) = layout.falling_rect(row, col, cell.position) else {
                continue;
            };
            let (r, g, b) = cell.color.blend_over(BACKGROUND_RGB);
            let square = Paragraph::new(cell.glyph().to_string().repeat(rect.width as usize))
                .style(Style::default().fg(Color::Rgb(r, g, b)).bg(Color::Rgb(r, g, b)));
            f.render_widget(square, rect);
        }
    }

    if app.config.display.show_label && layout.frame.height > 0 {
        let label_area = Rect {
            y: layout.frame.y + layout.frame.height / 2,
            height: 1,
            ..layout.frame
        };
        let label = Paragraph::new(Line::from(vec![Span::styled(
            LABEL,
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center);
        f.render_widget(label, label_area);
    }
}

fn render_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(app.section.title())
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let lines = match app.section {
        Section::About => about_lines(),
        Section::Config => config_lines(app, inner.width.saturating_sub(2) as usize),
        Section::Code => code_lines(app),
        Section::Hidden => Vec::new(),
    };
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(body, inner);
}

fn about_lines() -> Vec<Line<'static>> {
    vec![
        Line::from("Translucent squares drop out of a"),
        Line::from("grid, speed up as they fall and"),
        Line::from("reappear with a new colour."),
        Line::from(""),
        Line::from("Click a square to drop it."),
        Line::from("Tab or 2 opens the sliders,"),
        Line::from("r picks a random layout."),
    ]
}

fn config_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in ConfigField::ALL {
        let spec = field.spec();
        let value = app.controller.field_value(field);
        let selected = app.controller.selected() == field;
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(format_field_value(field, value), style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                slider_track(spec.ratio(value), width.max(4)),
                Style::default().fg(if selected { Color::Yellow } else { Color::DarkGray }),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select  ←/→ adjust  r randomize",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn code_lines(app: &App) -> Vec<Line<'static>> {
    let json = serde_json::to_string_pretty(app.controller.config())
        .unwrap_or_else(|e| format!("<{}>", e));
    let params = app.animator.params();
    let mut lines: Vec<Line<'static>> = json
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "trigger p = {:.4}",
        params.trigger_probability
    )));
    lines.push(Line::from(format!("growth    = {:.3}", params.growth_factor)));
    lines.push(Line::from(format!(
        "threshold = {:.0}px",
        app.animator.fall_threshold()
    )));
    lines
}

fn render_footer(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(vec![Span::styled(
        " q quit  ? help  Tab panel  r randomize  v fit viewport  m mode  click: drop ",
        Style::default().fg(Color::DarkGray),
    )]));
    f.render_widget(hints, area);
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from("Falling Squares - Help"),
        Line::from(""),
        Line::from("Keyboard Commands:"),
        Line::from("  q / Esc    - Quit"),
        Line::from("  ?          - Toggle this help screen"),
        Line::from("  Tab        - Cycle About / Config / Code / hidden"),
        Line::from("  1 2 3 0    - Jump to About / Config / Code / hide"),
        Line::from("  ↑/↓ j/k    - Select slider"),
        Line::from("  ←/→ h/l    - Adjust slider"),
        Line::from("  r          - Randomize configuration"),
        Line::from("  v          - Size grid from the terminal"),
        Line::from("  m          - Toggle wired / classic fall rates"),
        Line::from(""),
        Line::from("Mouse:"),
        Line::from("  Left click on a square drops it"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn app_with_seed() -> App {
        let mut config = AppConfig::default();
        config.seed = Some(3);
        App::new(config, (120, 40))
    }

    #[test]
    fn test_renders_header_label_and_about() {
        let app = app_with_seed();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_app(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Falling Squares"));
        assert!(text.contains(LABEL));
        assert!(text.contains("About"));
    }

    #[test]
    fn test_renders_config_sliders() {
        let mut app = app_with_seed();
        app.section = Section::Config;
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_app(f, &app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Rows: 15.0"));
        assert!(text.contains("Gravity Multiplier: 1.0"));
    }

    #[test]
    fn test_renders_falling_square_color() {
        let mut app = app_with_seed();
        app.section = Section::Hidden;
        app.animator.start_fall(0, 0).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_app(f, &app)).unwrap();

        let cell = app.animator.cell(0, 0).unwrap().clone();
        let (r, g, b) = cell.color.blend_over(BACKGROUND_RGB);
        let slot = app.grid_layout().square_rect(0, 0).unwrap();
        let buffer = terminal.backend().buffer();
        let painted = &buffer.content()[buffer.index_of(slot.x, slot.y)];
        assert_eq!(painted.bg, Color::Rgb(r, g, b));
    }

    #[test]
    fn test_resting_cells_draw_grid_marks() {
        let mut app = app_with_seed();
        app.section = Section::Hidden;
        app.animator.start_fall(0, 0).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_app(f, &app)).unwrap();

        let layout = app.grid_layout();
        let buffer = terminal.backend().buffer();
        let resting = layout.square_rect(1, 1).unwrap();
        assert_eq!(buffer.content()[buffer.index_of(resting.x, resting.y)].symbol(), "·");
        let falling = layout.square_rect(0, 0).unwrap();
        assert_eq!(buffer.content()[buffer.index_of(falling.x, falling.y)].symbol(), "█");

        app.config.display.show_grid_lines = false;
        terminal.draw(|f| render_app(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        assert_ne!(buffer.content()[buffer.index_of(resting.x, resting.y)].symbol(), "·");
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = app_with_seed();
        let mut terminal = Terminal::new(TestBackend::new(6, 4)).unwrap();
        terminal.draw(|f| render_app(f, &app)).unwrap();
    }
}
