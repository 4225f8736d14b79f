// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ticket layout solver.
//!
//! Everything here is pure: given a [`TextMeasure`] and the ticket content it
//! produces a [`TicketPlan`] with every string already wrapped, truncated and
//! positioned. The painter only draws what the plan says.
//!
//! Vertical structure of the card, top to bottom:
//! title, subtitle, name block (max two lines), count boxes, message, then a
//! fixed footer band of two detail lines and the footer line.

use super::measure::TextMeasure;
use super::TicketText;

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 700;

pub const CARD_PAD: f32 = 70.0;
pub const CARD_X: f32 = CARD_PAD;
pub const CARD_Y: f32 = CARD_PAD;
pub const CARD_W: f32 = CANVAS_WIDTH as f32 - CARD_PAD * 2.0;
pub const CARD_H: f32 = CANVAS_HEIGHT as f32 - CARD_PAD * 2.0;
pub const CARD_RADIUS: f32 = 34.0;

pub const INSET: f32 = 46.0;
pub const TEXT_LEFT: f32 = CARD_X + INSET;
pub const TEXT_MAX_WIDTH: f32 = CARD_W - INSET * 2.0;

pub const TITLE_SIZE: f32 = 54.0;
pub const TITLE_BASELINE: f32 = CARD_Y + 95.0;
pub const SUBTITLE_SIZE: f32 = 40.0;
pub const SUBTITLE_BASELINE: f32 = CARD_Y + 150.0;

pub const NAME_SIZE: f32 = 56.0;
pub const NAME_BASELINE: f32 = CARD_Y + 220.0;
pub const NAME_LINE_HEIGHT: f32 = 58.0;
pub const NAME_MAX_LINES: usize = 2;

pub const FOOTER_BASELINE: f32 = CARD_Y + CARD_H - 44.0;
pub const DETAIL2_BASELINE: f32 = FOOTER_BASELINE - 30.0;
pub const DETAIL1_BASELINE: f32 = DETAIL2_BASELINE - 34.0;
/// Nothing above the footer band may extend below this line.
pub const MESSAGE_BOTTOM: f32 = DETAIL1_BASELINE - 16.0;
pub const DETAIL_SIZE: f32 = 28.0;
pub const FOOTER_SIZE: f32 = 26.0;

pub const BOX_GAP: f32 = 24.0;
pub const BOX_W: f32 = (TEXT_MAX_WIDTH - BOX_GAP) / 2.0;
pub const BOX_RADIUS: f32 = 26.0;
pub const BOX_DESIRED_H: f32 = 150.0;
pub const BOX_MIN_H: f32 = 56.0;
pub const BOX_TOP_GAP: f32 = 12.0;
pub const BOX_MARGIN_AFTER: f32 = 20.0;
pub const BOX_TEXT_INSET: f32 = 24.0;

/// Message font sizes, tried in order.
pub const MESSAGE_SIZES: [f32; 2] = [38.0, 34.0];
pub const MESSAGE_LINE_HEIGHT: f32 = 42.0;

/// Extra slack kept between the message and the box bottom.
const MESSAGE_SLACK: f32 = 6.0;

pub const ELLIPSIS: char = '…';

/// A single line of text at a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
}

/// One of the two count boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct CountBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub number: PlacedText,
    pub label: PlacedText,
}

/// How the confirmation message was fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFit {
    /// Fits at the first size.
    Full,
    /// Fits after shrinking the font.
    Shrunk,
    /// Did not fit at any size. Pulled up to the lowest baseline the footer
    /// band allows and clamped there, into the box margin if need be.
    Clamped,
}

/// Message lines plus the box height chosen alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBlock {
    pub box_height: f32,
    pub size: f32,
    pub fit: MessageFit,
    pub lines: Vec<PlacedText>,
}

/// Fully solved ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketPlan {
    pub title: PlacedText,
    pub subtitle: PlacedText,
    pub name_lines: Vec<PlacedText>,
    pub adults_box: CountBox,
    pub kids_box: CountBox,
    pub message: MessageBlock,
    pub details: [PlacedText; 2],
    pub footer: PlacedText,
}

/// What goes on the ticket.
#[derive(Debug, Clone, Copy)]
pub struct TicketContent<'a> {
    pub name: &'a str,
    pub adults: u32,
    pub kids: u32,
    pub text: &'a TicketText,
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
///
/// Binary search over the char count of the kept prefix.
pub fn ellipsize(measure: &mut dyn TextMeasure, text: &str, size: f32, max_width: f32) -> String {
    if measure.width(text, size) <= max_width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let with_ellipsis = |n: usize| -> String {
        let mut s: String = chars[..n].iter().collect();
        s.push(ELLIPSIS);
        s
    };

    // Largest n in [0, len) with prefix(n) + "…" fitting; 0 always qualifies.
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo + 1 < hi {
        let mid = lo + (hi - lo) / 2;
        if measure.width(&with_ellipsis(mid), size) <= max_width {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let mut kept: String = chars[..lo].iter().collect();
    kept.truncate(kept.trim_end().len());
    kept.push(ELLIPSIS);
    kept
}

/// Greedy word wrap into at most `max_lines` lines.
///
/// When more lines would be needed, everything left collapses into the last
/// line with an ellipsis. A single word wider than `max_width` is kept whole
/// on its own line.
pub fn wrap_lines(
    measure: &mut dyn TextMeasure,
    text: &str,
    size: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut lines = Vec::new();
    let mut line = String::new();

    for (i, word) in words.iter().enumerate() {
        let candidate = if line.is_empty() {
            (*word).to_string()
        } else {
            format!("{line} {word}")
        };
        if measure.width(&candidate, size) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }

        if lines.len() + 1 >= max_lines {
            let rest = words[i..].join(" ");
            lines.push(ellipsize(measure, &rest, size, max_width));
            return lines;
        }
        line = (*word).to_string();
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap `text` from `first_baseline` down, never placing a baseline below
/// `max_baseline`. The last line that fits takes the remainder with an
/// ellipsis. Returns nothing if even the first line does not fit.
pub fn wrap_clamped(
    measure: &mut dyn TextMeasure,
    text: &str,
    size: f32,
    max_width: f32,
    line_height: f32,
    first_baseline: f32,
    max_baseline: f32,
) -> Vec<PlacedText> {
    let mut placed = Vec::new();
    if first_baseline > max_baseline {
        return placed;
    }

    let place = |text: String, baseline: f32| PlacedText {
        text,
        x: TEXT_LEFT,
        baseline,
        size,
    };

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut y = first_baseline;
    let mut line = String::new();

    for (i, word) in words.iter().enumerate() {
        if y + line_height > max_baseline {
            let mut rest = line.clone();
            for w in &words[i..] {
                if !rest.is_empty() {
                    rest.push(' ');
                }
                rest.push_str(w);
            }
            placed.push(place(ellipsize(measure, &rest, size, max_width), y));
            return placed;
        }

        let candidate = if line.is_empty() {
            (*word).to_string()
        } else {
            format!("{line} {word}")
        };
        if measure.width(&candidate, size) <= max_width {
            line = candidate;
            continue;
        }

        if !line.is_empty() {
            placed.push(place(std::mem::take(&mut line), y));
            y += line_height;
        }
        line = (*word).to_string();
    }

    if !line.is_empty() {
        placed.push(place(ellipsize(measure, &line, size, max_width), y));
    }
    placed
}

/// Choose the count-box height and message size for the space between
/// `box_top` and `bottom`.
///
/// Each candidate size is tried in order: the box takes whatever height
/// leaves room for one message line (between the floor and the desired
/// height). The first size whose message baseline fits wins. If none fit,
/// the last size is used: the message starts at the lowest baseline allowed
/// and is clamped to one ellipsized line. It is dropped only when that line
/// would start above the boxes.
pub fn solve_message_block(
    measure: &mut dyn TextMeasure,
    message: &str,
    box_top: f32,
    bottom: f32,
    sizes: &[f32],
) -> MessageBlock {
    let mut last = None;

    for (i, &size) in sizes.iter().enumerate() {
        let m = measure.metrics_or_fallback(size);
        let max_box_h = bottom - box_top - BOX_MARGIN_AFTER - m.ascent - m.descent - MESSAGE_SLACK;
        let box_height = max_box_h.floor().min(BOX_DESIRED_H).max(BOX_MIN_H);

        let baseline = box_top + box_height + BOX_MARGIN_AFTER + m.ascent;
        let max_baseline = bottom - m.descent;

        if baseline <= max_baseline {
            let lines = wrap_clamped(
                measure,
                message,
                size,
                TEXT_MAX_WIDTH,
                MESSAGE_LINE_HEIGHT,
                baseline,
                max_baseline,
            );
            return MessageBlock {
                box_height,
                size,
                fit: if i == 0 { MessageFit::Full } else { MessageFit::Shrunk },
                lines,
            };
        }
        last = Some((size, box_height, baseline, max_baseline, m.ascent));
    }

    let Some((size, box_height, baseline, max_baseline, ascent)) = last else {
        return MessageBlock {
            box_height: BOX_DESIRED_H,
            size: 0.0,
            fit: MessageFit::Clamped,
            lines: Vec::new(),
        };
    };

    let first_baseline = baseline.min(max_baseline);
    let lines = if first_baseline - ascent >= box_top {
        wrap_clamped(
            measure,
            message,
            size,
            TEXT_MAX_WIDTH,
            MESSAGE_LINE_HEIGHT,
            first_baseline,
            max_baseline,
        )
    } else {
        Vec::new()
    };

    MessageBlock {
        box_height,
        size,
        fit: MessageFit::Clamped,
        lines,
    }
}

fn count_box(x: f32, y: f32, h: f32, label: &str, value: u32) -> CountBox {
    let number_size = (h * 0.46).floor().clamp(20.0, 64.0);
    let label_size = (h * 0.22).floor().clamp(14.0, 30.0);

    CountBox {
        x,
        y,
        w: BOX_W,
        h,
        number: PlacedText {
            text: value.to_string(),
            x: x + BOX_TEXT_INSET,
            baseline: y + (h * 0.62).floor().max(54.0),
            size: number_size,
        },
        label: PlacedText {
            text: label.to_string(),
            x: x + BOX_TEXT_INSET,
            baseline: y + (h * 0.84).floor().max(68.0),
            size: label_size,
        },
    }
}

fn fitted_line(measure: &mut dyn TextMeasure, text: &str, size: f32, baseline: f32) -> PlacedText {
    PlacedText {
        text: ellipsize(measure, text, size, TEXT_MAX_WIDTH),
        x: TEXT_LEFT,
        baseline,
        size,
    }
}

/// Solve the full ticket layout.
pub fn solve_layout(measure: &mut dyn TextMeasure, content: &TicketContent<'_>) -> TicketPlan {
    let text = content.text;

    let title = fitted_line(measure, &text.title, TITLE_SIZE, TITLE_BASELINE);
    let subtitle = fitted_line(measure, &text.subtitle, SUBTITLE_SIZE, SUBTITLE_BASELINE);

    let name_lines: Vec<PlacedText> = wrap_lines(
        measure,
        content.name.trim(),
        NAME_SIZE,
        TEXT_MAX_WIDTH,
        NAME_MAX_LINES,
    )
    .into_iter()
    .enumerate()
    .map(|(i, line)| PlacedText {
        text: line,
        x: TEXT_LEFT,
        baseline: NAME_BASELINE + i as f32 * NAME_LINE_HEIGHT,
        size: NAME_SIZE,
    })
    .collect();
    let name_end = NAME_BASELINE + name_lines.len() as f32 * NAME_LINE_HEIGHT;

    let box_top = name_end + BOX_TOP_GAP;
    let places = content.adults.saturating_add(content.kids);
    let message = solve_message_block(
        measure,
        &text.message_for(places),
        box_top,
        MESSAGE_BOTTOM,
        &MESSAGE_SIZES,
    );

    let adults_box = count_box(
        TEXT_LEFT,
        box_top,
        message.box_height,
        &text.adults_label,
        content.adults,
    );
    let kids_box = count_box(
        TEXT_LEFT + BOX_W + BOX_GAP,
        box_top,
        message.box_height,
        &text.kids_label,
        content.kids,
    );

    let details = [
        fitted_line(measure, &text.details[0], DETAIL_SIZE, DETAIL1_BASELINE),
        fitted_line(measure, &text.details[1], DETAIL_SIZE, DETAIL2_BASELINE),
    ];
    let footer = fitted_line(measure, &text.footer, FOOTER_SIZE, FOOTER_BASELINE);

    TicketPlan {
        title,
        subtitle,
        name_lines,
        adults_box,
        kids_box,
        message,
        details,
        footer,
    }
}
