//! Content-stream interpretation: PDF text operators to positioned words.
//!
//! A reduced text-state machine. PDF positions text through a pair of
//! matrices (the text matrix and the text line matrix) that the `Td`/`TD`/
//! `Tm`/`T*` operators manipulate; showing operators (`Tj`/`TJ`/`'`/`"`)
//! paint glyphs at the current matrix position and advance it. We track just
//! enough of that machinery to recover each word's origin and effective font
//! size — glyph metrics are approximated, because downstream only needs
//! 2-unit vertical bucketing and left-to-right ordering, not typography.

use lopdf::content::Operation;
use lopdf::Object;

use crate::types::WordToken;

/// Approximate character width as a fraction of font size. A reasonable
/// default for proportional fonts when the actual widths array is not
/// consulted.
const APPROX_CHAR_WIDTH_RATIO: f64 = 0.5;

/// A `TJ` kerning adjustment below this many thousandths is inter-word
/// spacing rather than kerning, and breaks the current word.
const WORD_BREAK_KERN: f64 = -150.0;

/// The identity text matrix `[a, b, c, d, e, f]`.
const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Mutable text state while walking one page's content stream.
struct TextState {
    /// Nominal font size set by `Tf`, in text-space units.
    font_size: f64,
    text_matrix: [f64; 6],
    line_matrix: [f64; 6],
    /// Leading set by `TL`/`TD`, consumed by `T*` and `'`.
    leading: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_size: 0.0,
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn x(&self) -> f64 {
        self.text_matrix[4]
    }

    fn y(&self) -> f64 {
        self.text_matrix[5]
    }

    /// Rendered font size: nominal size scaled by the vertical magnitude of
    /// the text matrix.
    fn effective_font_size(&self) -> f64 {
        let scale = (self.text_matrix[1].powi(2) + self.text_matrix[3].powi(2)).sqrt();
        (self.font_size * scale).abs()
    }

    /// Advance the text matrix horizontally by `dx` text-space units.
    fn advance_x(&mut self, dx: f64) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// `Td`/`TD`: translate the line matrix and restart the text matrix
    /// from it.
    fn translate_line(&mut self, tx: f64, ty: f64) {
        let new_tx = self.line_matrix[0] * tx + self.line_matrix[2] * ty + self.line_matrix[4];
        let new_ty = self.line_matrix[1] * tx + self.line_matrix[3] * ty + self.line_matrix[5];
        self.line_matrix[4] = new_tx;
        self.line_matrix[5] = new_ty;
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.leading;
        self.translate_line(0.0, -leading);
    }
}

/// Walks one page's operations and accumulates [`WordToken`]s.
pub(crate) struct TextInterpreter {
    page_height: f64,
    state: TextState,
    word: String,
    /// `(x, y, effective font size)` captured at the word's first glyph.
    word_origin: Option<(f64, f64, f64)>,
    tokens: Vec<WordToken>,
}

impl TextInterpreter {
    pub(crate) fn new(page_height: f64) -> Self {
        Self {
            page_height,
            state: TextState::default(),
            word: String::new(),
            word_origin: None,
            tokens: Vec::new(),
        }
    }

    pub(crate) fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                self.flush_word();
                self.state.text_matrix = IDENTITY;
                self.state.line_matrix = IDENTITY;
            }
            "ET" => self.flush_word(),
            "Tf" => {
                if let Some(size) = operands.get(1).and_then(operand_number) {
                    self.state.font_size = size;
                }
            }
            "Td" => {
                self.flush_word();
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(operand_number),
                    operands.get(1).and_then(operand_number),
                ) {
                    self.state.translate_line(tx, ty);
                }
            }
            "TD" => {
                self.flush_word();
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(operand_number),
                    operands.get(1).and_then(operand_number),
                ) {
                    self.state.leading = -ty;
                    self.state.translate_line(tx, ty);
                }
            }
            "Tm" => {
                self.flush_word();
                let values: Vec<f64> = operands.iter().filter_map(operand_number).collect();
                if values.len() == 6 {
                    let matrix = [
                        values[0], values[1], values[2], values[3], values[4], values[5],
                    ];
                    self.state.text_matrix = matrix;
                    self.state.line_matrix = matrix;
                }
            }
            "T*" => {
                self.flush_word();
                self.state.next_line();
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(operand_number) {
                    self.state.leading = leading;
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(&decode_string_bytes(bytes));
                }
            }
            "'" => {
                self.flush_word();
                self.state.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(&decode_string_bytes(bytes));
                }
            }
            "\"" => {
                self.flush_word();
                self.state.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    self.show_text(&decode_string_bytes(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(elements)) = operands.first() {
                    for element in elements {
                        match element {
                            Object::String(bytes, _) => {
                                self.show_text(&decode_string_bytes(bytes));
                            }
                            other => {
                                if let Some(adjustment) = operand_number(other) {
                                    let dx = -adjustment / 1000.0 * self.state.font_size;
                                    if adjustment < WORD_BREAK_KERN {
                                        self.flush_word();
                                    }
                                    self.state.advance_x(dx);
                                }
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Flush the open word and return everything collected.
    pub(crate) fn finish(mut self) -> Vec<WordToken> {
        self.flush_word();
        self.tokens
    }

    fn show_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.flush_word();
            } else {
                if self.word.is_empty() {
                    self.word_origin = Some((
                        self.state.x(),
                        self.state.y(),
                        self.state.effective_font_size(),
                    ));
                }
                self.word.push(ch);
            }
            self.state
                .advance_x(self.state.font_size * APPROX_CHAR_WIDTH_RATIO);
        }
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            self.word_origin = None;
            return;
        }
        if let Some((x, y, font_size)) = self.word_origin.take() {
            self.tokens.push(WordToken {
                text: std::mem::take(&mut self.word),
                x,
                // PDF y grows upward; tokens carry distance from the top.
                y: self.page_height - y,
                font_size,
            });
        } else {
            self.word.clear();
        }
    }
}

/// Numeric operand, integer or real.
pub(crate) fn operand_number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

/// Decode a PDF string's bytes to text: UTF-16BE when BOM-marked, otherwise
/// treated as Latin-1. Font-specific encodings are not consulted — for the
/// word-geometry purposes of this pipeline, a best-effort decode is enough.
fn decode_string_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let code_units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&code_units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
