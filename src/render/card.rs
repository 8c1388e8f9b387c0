//! Console-themed stats card

use super::{escape, language_slices, pie_chart};
use crate::stats::Summary;
use std::fmt::Write;

const WIDTH: f64 = 1000.0;
const PADDING: f64 = 50.0;
const LINE_SPACE: f64 = 35.0;
const FONT_SIZE: f64 = 30.0;
const PIE_SIZE: u32 = 300;
const LEGEND_ROW: f64 = 35.0;
const LEGEND_NAME_WIDTH: usize = 15;

/// Ascent plus descent of a lowercase glyph relative to the font size
const GLYPH_HEIGHT_RATIO: f64 = 0.55;

/// Render the full card for `username`.
pub fn render(summary: &Summary, username: &str) -> String {
    let text_height = FONT_SIZE * GLYPH_HEIGHT_RATIO;
    let command_y = PADDING + text_height;
    let stats_y = command_y + 1.5 * LINE_SPACE;
    let pie_y = stats_y + 4.0 * LINE_SPACE + 20.0;
    let height = pie_y + f64::from(PIE_SIZE) + PADDING;

    let slices = language_slices(&summary.languages);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}">
    <style>
        text, tspan {{
            white-space: pre;
            font-family: monospace;
        }}
        .console {{
            font-size: {FONT_SIZE}px;
            fill: #00FF00;
        }}
        .legend {{
            font-size: 20px;
        }}
        .cyan {{ fill: #00FFFF; }}
        .white {{ fill: #FFFFFF; }}
        .green {{ fill: #4CCC6C; }}
        .red {{ fill: #FF5555; }}
    </style>
    <rect width="100%" height="100%" fill="black" rx="15"/>

    <text x="{PADDING}" y="{PADDING}" class="console">
        <tspan x="{PADDING}" y="{command_y}">$ {user} github-stats</tspan>
        <tspan x="{PADDING}" y="{row0}"><tspan class="cyan">account-age:</tspan> <tspan class="white">{age} days</tspan></tspan>
        <tspan x="{PADDING}" y="{row1}"><tspan class="cyan">repos:</tspan> <tspan class="white">{repos}</tspan></tspan>
        <tspan x="{PADDING}" y="{row2}"><tspan class="cyan">commits:</tspan> <tspan class="white">{commits}</tspan></tspan>
        <tspan x="{PADDING}" y="{row3}"><tspan class="cyan">lines:</tspan> <tspan class="white">{net} (<tspan class="green">{additions}++</tspan>, <tspan class="red">{deletions}--</tspan>)</tspan></tspan>
        <tspan x="{PADDING}" y="{row4}"><tspan class="cyan">languages:</tspan></tspan>
    </text>
"#,
        user = escape(username),
        row0 = stats_y,
        row1 = stats_y + LINE_SPACE,
        row2 = stats_y + 2.0 * LINE_SPACE,
        row3 = stats_y + 3.0 * LINE_SPACE,
        row4 = stats_y + 4.0 * LINE_SPACE,
        age = summary.account_age,
        repos = summary.repo_count,
        commits = summary.commits,
        net = summary.net_lines(),
        additions = summary.additions,
        deletions = summary.deletions,
    );

    if slices.is_empty() {
        let _ = writeln!(
            svg,
            r#"    <text x="{PADDING}" y="{}" class="console white">no language data</text>"#,
            pie_y + LINE_SPACE
        );
    } else {
        let _ = writeln!(
            svg,
            "    <g transform=\"translate({PADDING}, {pie_y})\">\n{}\n    </g>",
            pie_chart(&slices, PIE_SIZE)
        );

        let _ = writeln!(
            svg,
            "    <g transform=\"translate({}, {})\" class=\"legend\">",
            PADDING + f64::from(PIE_SIZE) + 50.0,
            pie_y + 20.0
        );
        for (index, slice) in slices.iter().enumerate() {
            let y = index as f64 * LEGEND_ROW;
            let _ = writeln!(
                svg,
                r##"        <rect x="0" y="{y}" width="20" height="20" fill="{}" stroke="#333" stroke-width="1" />
        <text x="30" y="{}" class="white">{:<width$} {:.1}%</text>"##,
                slice.color,
                y + 16.0,
                escape(&slice.name),
                slice.percentage,
                width = LEGEND_NAME_WIDTH
            );
        }
        svg.push_str("    </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}
