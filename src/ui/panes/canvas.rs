//! Scene canvas: draws whichever algorithm family is on screen

use crate::checkpoint::Mark;
use crate::grid::Coord;
use crate::ui::scene::{Family, FactorScene, Highlight, Scene};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Padding, Paragraph,
    },
    Frame,
};

/// Numbers per row in the sieve layout
const SIEVE_COLUMNS: u64 = 10;

pub fn render_canvas_pane(frame: &mut Frame, area: Rect, scene: &Scene, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border))
        .padding(Padding::new(1, 1, 0, 0));

    if scene.family == Family::Graph {
        render_graph(frame, area, scene, block);
        return;
    }

    let lines = match scene.family {
        Family::Empty => vec![Line::from(Span::styled(
            "(waiting for the first checkpoint)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
        Family::List => list_lines(scene),
        Family::Stack => stack_lines(scene),
        Family::Hash => hash_lines(scene),
        Family::Sieve => sieve_lines(scene, area.height.saturating_sub(2) as usize),
        Family::Factor => factor_lines(&scene.factor),
        Family::Gcd => gcd_lines(scene),
        Family::Grid => grid_lines(scene),
        Family::Graph => Vec::new(),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn list_lines(scene: &Scene) -> Vec<Line<'static>> {
    let list = &scene.list;
    let mut spans = Vec::new();
    for (i, slot) in list.slots.iter().enumerate() {
        match slot {
            Some(slot) => {
                let style = match slot.highlight {
                    Some(Highlight::Found) => Style::default()
                        .fg(Color::Black)
                        .bg(DEFAULT_THEME.success)
                        .add_modifier(Modifier::BOLD),
                    Some(Highlight::Visited) => Style::default().fg(Color::Black).bg(DEFAULT_THEME.visited),
                    Some(Highlight::Fresh) => Style::default().fg(Color::Black).bg(DEFAULT_THEME.secondary),
                    None => Style::default().fg(DEFAULT_THEME.fg),
                };
                spans.push(Span::styled(format!("[{}]", slot.data), style));
            }
            None => spans.push(Span::styled("[ ]", Style::default().fg(DEFAULT_THEME.comment))),
        }
        match list.arrows.get(&i) {
            Some(&to) if to == i + 1 => spans.push(Span::raw(" \u{2192} ")),
            Some(&to) => spans.push(Span::styled(
                format!(" \u{21aa}{} ", to),
                Style::default().fg(DEFAULT_THEME.frontier),
            )),
            None => spans.push(Span::raw("   ")),
        }
    }

    let mut lines = vec![Line::from(spans)];
    if list.exhausted {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "not found",
            Style::default().fg(DEFAULT_THEME.error),
        )));
    }
    lines
}

fn stack_lines(scene: &Scene) -> Vec<Line<'static>> {
    let stack = &scene.stack;
    let mut lines = Vec::new();
    if let Some(popped) = stack.popped {
        lines.push(Line::from(Span::styled(
            format!("  {}  \u{2191} popped", popped),
            Style::default().fg(DEFAULT_THEME.secondary),
        )));
    }
    for (depth, value) in stack.items.iter().enumerate().rev() {
        let style = if stack.highlighted == Some(depth) {
            Style::default().fg(Color::Black).bg(DEFAULT_THEME.frontier)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(Line::from(vec![
            Span::styled("\u{2502}", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(format!("{:^7}", value), style),
            Span::styled("\u{2502}", Style::default().fg(DEFAULT_THEME.comment)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2518}",
        Style::default().fg(DEFAULT_THEME.comment),
    )));
    lines
}

fn hash_lines(scene: &Scene) -> Vec<Line<'static>> {
    let hash = &scene.hash;
    hash.buckets
        .iter()
        .enumerate()
        .map(|(b, entries)| {
            let label_style = if hash.highlighted == Some(b) {
                Style::default().fg(Color::Black).bg(DEFAULT_THEME.frontier)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            let mut spans = vec![Span::styled(format!("{:>3} ", b), label_style)];
            for (slot, (k, v)) in entries.iter().enumerate() {
                let style = if hash.visited == Some((b, slot)) {
                    Style::default().fg(Color::Black).bg(DEFAULT_THEME.visited)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                };
                spans.push(Span::raw(" \u{2192} "));
                spans.push(Span::styled(format!("({}: {})", k, v), style));
            }
            Line::from(spans)
        })
        .collect()
}

fn sieve_lines(scene: &Scene, height: usize) -> Vec<Line<'static>> {
    let sieve = &scene.sieve;
    let mut lines = Vec::new();
    let mut n = 2;
    while n <= sieve.upto && lines.len() < height {
        let mut spans = Vec::new();
        for value in n..=(n + SIEVE_COLUMNS - 1).min(sieve.upto) {
            let is_prime = sieve
                .primes
                .as_ref()
                .is_some_and(|p| p.binary_search(&value).is_ok());
            let style = if is_prime {
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD)
            } else if sieve.base == Some(value) {
                Style::default().fg(Color::Black).bg(DEFAULT_THEME.secondary)
            } else if sieve.marked.contains(&value) {
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(format!("{:>5}", value), style));
        }
        lines.push(Line::from(spans));
        n += SIEVE_COLUMNS;
    }
    lines
}

fn factor_lines(tree: &FactorScene) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if tree.node(0).is_some() {
        push_factor_node(tree, 0, String::new(), String::new(), &mut lines);
    }
    lines
}

fn push_factor_node(
    tree: &FactorScene,
    index: usize,
    lead: String,
    indent: String,
    lines: &mut Vec<Line<'static>>,
) {
    let Some(node) = tree.node(index) else {
        return;
    };
    let style = if node.dropped {
        Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if node.leaf {
        Style::default()
            .fg(DEFAULT_THEME.success)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    lines.push(Line::from(vec![
        Span::styled(lead, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(node.value.to_string(), style),
    ]));

    if let Some((factor, quotient)) = node.children {
        push_factor_node(
            tree,
            factor,
            format!("{}\u{251c}\u{2500} ", indent),
            format!("{}\u{2502}  ", indent),
            lines,
        );
        push_factor_node(
            tree,
            quotient,
            format!("{}\u{2514}\u{2500} ", indent),
            format!("{}   ", indent),
            lines,
        );
    }
}

fn gcd_lines(scene: &Scene) -> Vec<Line<'static>> {
    let gcd = &scene.gcd;
    let mut lines: Vec<Line> = gcd
        .rows
        .iter()
        .map(|&(dividend, divisor, quotient, remainder)| {
            Line::from(vec![
                Span::styled(format!("{:>8}", dividend), Style::default().fg(DEFAULT_THEME.fg)),
                Span::raw(" = "),
                Span::styled(format!("{:>4}", quotient), Style::default().fg(DEFAULT_THEME.secondary)),
                Span::raw(" \u{d7} "),
                Span::styled(format!("{:>8}", divisor), Style::default().fg(DEFAULT_THEME.primary)),
                Span::raw(" + "),
                Span::styled(format!("{:>8}", remainder), Style::default().fg(DEFAULT_THEME.visited)),
            ])
        })
        .collect();
    if let Some(value) = gcd.result {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("gcd = {}", value),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines
}

fn grid_lines(scene: &Scene) -> Vec<Line<'static>> {
    let grid = &scene.grid;
    (0..grid.rows)
        .map(|row| {
            let spans: Vec<Span> = (0..grid.cols)
                .map(|col| {
                    let at = Coord::new(row, col);
                    let Some(cell) = grid.cell(at) else {
                        return Span::raw("  ");
                    };
                    let bg = if cell.wall {
                        DEFAULT_THEME.wall
                    } else if grid.path.contains(&at) {
                        DEFAULT_THEME.path
                    } else {
                        match cell.mark {
                            Some(Mark::Path) => DEFAULT_THEME.path,
                            Some(Mark::Current) => DEFAULT_THEME.current,
                            Some(Mark::Frontier) => DEFAULT_THEME.frontier,
                            Some(Mark::Visited) => DEFAULT_THEME.visited,
                            None => Color::Reset,
                        }
                    };
                    let glyph = if cell.weight && !cell.wall { "\u{2591}\u{2591}" } else { "  " };
                    Span::styled(glyph, Style::default().bg(bg).fg(DEFAULT_THEME.weight))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_graph(frame: &mut Frame, area: Rect, scene: &Scene, block: Block) {
    let graph = &scene.graph;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (0.0f64, 1.0f64, 0.0f64, 1.0f64);
    for v in &graph.vertices {
        min_x = min_x.min(v.position.x as f64);
        max_x = max_x.max(v.position.x as f64);
        min_y = min_y.min(-v.position.y as f64);
        max_y = max_y.max(-v.position.y as f64);
    }
    // Leave room for labels
    let margin = 2.0;

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([min_x - margin, max_x + margin])
        .y_bounds([min_y - margin, max_y + margin])
        .paint(|ctx| {
            for e in &graph.edges {
                let (Some(a), Some(b)) = (graph.position(e.from), graph.position(e.to)) else {
                    continue;
                };
                let color = if e.traversed {
                    DEFAULT_THEME.path
                } else {
                    DEFAULT_THEME.comment
                };
                ctx.draw(&CanvasLine::new(
                    a.x as f64,
                    -a.y as f64,
                    b.x as f64,
                    -b.y as f64,
                    color,
                ));
                if let Some(w) = e.weight {
                    let (mx, my) = ((a.x + b.x) as f64 / 2.0, -(a.y + b.y) as f64 / 2.0);
                    ctx.print(
                        mx,
                        my,
                        Span::styled(w.to_string(), Style::default().fg(DEFAULT_THEME.weight)),
                    );
                }
            }
            ctx.layer();
            for v in &graph.vertices {
                let style = if v.visited {
                    Style::default().fg(Color::Black).bg(DEFAULT_THEME.visited)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg).bg(DEFAULT_THEME.wall)
                };
                ctx.print(
                    v.position.x as f64,
                    -v.position.y as f64,
                    Span::styled(v.id.to_string(), style),
                );
            }
        });
    frame.render_widget(canvas, area);
}
