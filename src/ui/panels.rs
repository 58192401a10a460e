use std::time::Instant;

use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel_block_with_meta;
use super::theme::{COLOR_MUTED, color_for_percent};
use crate::app::{App, PanelMeta};
use crate::data::{CpuStats, GpuStats, MemoryStats, NetworkInterface, SystemInfo};
use crate::utils::{fit_text, format_gib, format_kb, gib, percent, render_bar, text_width};

const UNKNOWN: &str = "Unknown";
const WAITING: &str = "waiting for data...";

pub fn render_cpu(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let bar_width = area.width.saturating_sub(24) as usize;
    let lines = app
        .cpu
        .value()
        .map(|stats| cpu_lines(stats, bar_width))
        .unwrap_or_else(waiting);
    render_panel(frame, area, "CPU", &app.cpu.meta, lines, now);
}

pub fn render_memory(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let lines = app.memory.value().map(memory_lines).unwrap_or_else(waiting);
    render_panel(frame, area, "Memory", &app.memory.meta, lines, now);
}

pub fn render_system(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let lines = app.system.value().map(system_lines).unwrap_or_else(waiting);
    render_panel(frame, area, "System", &app.system.meta, lines, now);
}

pub fn render_networks(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let lines = app
        .networks
        .value()
        .map(|networks| network_lines(networks))
        .unwrap_or_else(waiting);
    render_panel(frame, area, "Network", &app.networks.meta, lines, now);
}

pub fn render_gpus(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let lines = app
        .gpus
        .value()
        .map(|gpus| gpu_lines(gpus))
        .unwrap_or_else(waiting);
    render_panel(frame, area, "GPU", &app.gpus.meta, lines, now);
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    meta: &PanelMeta,
    lines: Vec<Line<'static>>,
    now: Instant,
) {
    let block = panel_block_with_meta(title, meta, now);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = inner.width as usize;
    let lines = lines
        .into_iter()
        .map(|line| fit_line(line, width))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn waiting() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        WAITING,
        Style::default().fg(COLOR_MUTED),
    ))]
}

fn label(text: &str) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::BOLD),
    )
}

fn value(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::White))
}

fn or_unknown(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Trims a styled line to `width` columns without dropping span styles.
fn fit_line(line: Line<'static>, width: usize) -> Line<'static> {
    let mut remaining = width;
    let mut spans = Vec::with_capacity(line.spans.len());
    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let span_width = text_width(&span.content);
        if span_width <= remaining {
            remaining -= span_width;
            spans.push(span);
        } else {
            spans.push(Span::styled(fit_text(&span.content, remaining), span.style));
            remaining = 0;
        }
    }
    Line::from(spans)
}

pub fn cpu_lines(stats: &CpuStats, bar_width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            label("Model "),
            value(or_unknown(stats.cpu_product_name.as_deref())),
        ]),
        Line::from(vec![
            label("Load  "),
            value(
                stats
                    .cpu_load_average
                    .map(|load| format!("{load}%"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]),
    ];
    for (idx, usage) in stats.cpu_usage.iter().enumerate() {
        let color = color_for_percent(*usage);
        let mut spans = vec![
            label(&format!("Core {idx:<3}")),
            value(format!("{usage:>7.2}%")),
        ];
        if bar_width > 0 {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                render_bar(*usage, bar_width),
                Style::default().fg(color),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

pub fn memory_lines(stats: &MemoryStats) -> Vec<Line<'static>> {
    let used_pct = percent(stats.used_memory, stats.total_memory);
    let pct_text = used_pct
        .map(|pct| format!("{pct:.2}%"))
        .unwrap_or_else(|| "n/a".to_string());
    let pct_color = used_pct.map(color_for_percent).unwrap_or(COLOR_MUTED);

    let row = |name: &str, amount: u64| Line::from(vec![label(name), value(format_gib(amount))]);
    vec![
        row("Total     ", stats.total_memory),
        Line::from(vec![
            label("Used      "),
            value(format!("{:.2} GiB ", gib(stats.used_memory))),
            Span::styled(format!("({pct_text})"), Style::default().fg(pct_color)),
        ]),
        row("Free      ", stats.free_memory),
        row("Available ", stats.available_memory),
        row("Swap      ", stats.total_swap),
        row("Swap used ", stats.used_swap),
        row("Swap free ", stats.free_swap),
    ]
}

pub fn system_lines(info: &SystemInfo) -> Vec<Line<'static>> {
    let fields = [
        ("Name    ", info.name.as_deref()),
        ("Host    ", info.host_name.as_deref()),
        ("OS      ", info.long_os_version.as_deref()),
        ("Version ", info.os_version.as_deref()),
        ("Distro  ", info.distribution_id.as_deref()),
        ("Kernel  ", info.kernel_version.as_deref()),
        ("Uptime  ", info.uptime.as_deref()),
    ];
    fields
        .into_iter()
        .map(|(name, field)| Line::from(vec![label(name), value(or_unknown(field))]))
        .collect()
}

pub fn network_lines(networks: &[NetworkInterface]) -> Vec<Line<'static>> {
    if networks.is_empty() {
        return vec![Line::from(Span::styled(
            "no interfaces",
            Style::default().fg(COLOR_MUTED),
        ))];
    }
    let name_width = networks
        .iter()
        .map(|net| text_width(&net.interface_name))
        .max()
        .unwrap_or(0)
        .min(16);
    networks
        .iter()
        .map(|net| {
            Line::from(vec![
                label(&format!(
                    "{:<width$} ",
                    fit_text(&net.interface_name, name_width),
                    width = name_width
                )),
                Span::styled("rx ", Style::default().fg(COLOR_MUTED)),
                value(format!("{:<14}", format_kb(net.received))),
                Span::styled("tx ", Style::default().fg(COLOR_MUTED)),
                value(format_kb(net.transmitted)),
            ])
        })
        .collect()
}

pub fn gpu_line(gpu: &GpuStats) -> String {
    let name = gpu.name.as_deref().unwrap_or(UNKNOWN);
    let memory = gpu
        .memory
        .map(|memory| format!("{:.0}", gib(memory)))
        .unwrap_or_else(|| "-".to_string());
    let temperature = gpu
        .temperature
        .map(|temp| temp.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{name} {memory} GiB {temperature} ºC")
}

pub fn gpu_lines(gpus: &[GpuStats]) -> Vec<Line<'static>> {
    if gpus.is_empty() {
        return vec![Line::from(Span::styled(
            "no GPUs reported",
            Style::default().fg(COLOR_MUTED),
        ))];
    }
    gpus.iter()
        .map(|gpu| Line::from(value(gpu_line(gpu))))
        .collect()
}
