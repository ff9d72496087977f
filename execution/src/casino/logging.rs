use highlow_types::casino::{Card, Guess, SessionState, VariantId};
use std::fmt::Write;

/// Compact JSON line describing one resolved guess.
pub fn format_guess_log(
    variant: VariantId,
    previous: &Card,
    drawn: &Card,
    guess: Guess,
    probability: u8,
    correct: bool,
    state: &SessionState,
) -> String {
    let mut out = String::with_capacity(192);
    let _ = write!(
        out,
        concat!(
            r#"{{"variant":"{}","previous":"{}","drawn":"{}","guess":"{}","#,
            r#""probability":{},"correct":{},"score":{},"streak":{},"multiplier":{:.1}"#,
        ),
        variant,
        previous.code(),
        drawn.code(),
        guess,
        probability,
        correct,
        state.score,
        state.streak,
        state.multiplier,
    );
    if let Some(mode) = state.special_mode {
        let _ = write!(out, r#","specialMode":"{}""#, mode);
    }
    if state.game_over {
        out.push_str(r#","gameOver":true"#);
    }
    out.push('}');
    out
}

/// Compact JSON line describing a cash-out.
pub fn format_cash_out_log(variant: VariantId, score: u64, balance: u64) -> String {
    format!(
        r#"{{"variant":"{}","cashOut":{},"balance":{}}}"#,
        variant, score, balance
    )
}
