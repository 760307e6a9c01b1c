use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// What the betting round looks like from the acting player's seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    /// Chips behind
    pub stack: u32,
    /// Chips the player already committed this street
    pub current_bet: u32,
    /// Highest commitment of any player this street
    pub highest_bet: u32,
    /// Smallest legal raise increment
    pub min_raise: u32,
    /// False once the player has acted and only a short all-in has raised
    /// since; such a player may call or fold but not raise
    pub can_raise: bool,
}

impl BettingContext {
    pub fn to_call(&self) -> u32 {
        self.highest_bet.saturating_sub(self.current_bet)
    }
}

/// An action that passed validation, with the exact chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved; less than the stack
    Call(u32),
    /// Full raise that leaves chips behind
    Raise { chips: u32, raise_to: u32 },
    /// Whole stack; `raise_to` may be at, below or above the highest bet
    AllIn { chips: u32, raise_to: u32 },
}

/// Validates a player action against the betting round.
///
/// Short stacks are never blocked: a call or raise from a stack that cannot
/// cover the call becomes an all-in call. Otherwise raises are never
/// clamped: asking for more chips than the player owns is rejected.
///
/// # Errors
///
/// - [`GameError::IllegalAction`] - checking into a bet, acting with no
///   chips, or raising when action has not been reopened
/// - [`GameError::InvalidRaiseAmount`] - raise below the minimum or beyond
///   the stack
///
/// # Examples
///
/// ```
/// use riverhold_engine::player::PlayerAction;
/// use riverhold_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext { stack: 60, current_bet: 0, highest_bet: 100, min_raise: 100, can_raise: true };
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Call),
///     Ok(ValidatedAction::AllIn { chips: 60, raise_to: 60 })
/// );
/// let deep = BettingContext { stack: 150, ..ctx };
/// assert!(validate_action(&deep, PlayerAction::Raise(100)).is_err());
/// ```
pub fn validate_action(ctx: &BettingContext, action: A) -> Result<ValidatedAction, GameError> {
    let to_call = ctx.to_call();
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::IllegalAction {
                    action: "check",
                    reason: format!("facing a bet of {to_call}"),
                })
            }
        }
        A::Call => {
            if to_call == 0 {
                return Ok(ValidatedAction::Check);
            }
            if ctx.stack == 0 {
                return Err(no_chips("call"));
            }
            if ctx.stack <= to_call {
                Ok(ValidatedAction::AllIn {
                    chips: ctx.stack,
                    raise_to: ctx.current_bet + ctx.stack,
                })
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(_) if ctx.stack > 0 && ctx.stack <= to_call => Ok(ValidatedAction::AllIn {
            chips: ctx.stack,
            raise_to: ctx.current_bet + ctx.stack,
        }),
        A::Raise(by) => {
            if !ctx.can_raise {
                return Err(not_reopened("raise"));
            }
            let maximum = ctx.stack.saturating_sub(to_call);
            let invalid = GameError::InvalidRaiseAmount {
                amount: by,
                minimum: ctx.min_raise.min(maximum),
                maximum,
            };
            if by == 0 {
                return Err(invalid);
            }
            let chips = match to_call.checked_add(by) {
                Some(chips) if chips <= ctx.stack => chips,
                _ => return Err(invalid),
            };
            let raise_to = ctx.current_bet + chips;
            if chips == ctx.stack {
                Ok(ValidatedAction::AllIn { chips, raise_to })
            } else if by < ctx.min_raise {
                Err(invalid)
            } else {
                Ok(ValidatedAction::Raise { chips, raise_to })
            }
        }
        A::AllIn => {
            if ctx.stack == 0 {
                return Err(no_chips("all-in"));
            }
            let raise_to = ctx.current_bet + ctx.stack;
            if raise_to > ctx.highest_bet && !ctx.can_raise {
                return Err(not_reopened("all-in"));
            }
            Ok(ValidatedAction::AllIn {
                chips: ctx.stack,
                raise_to,
            })
        }
    }
}

fn no_chips(action: &'static str) -> GameError {
    GameError::IllegalAction {
        action,
        reason: "no chips behind".into(),
    }
}

fn not_reopened(action: &'static str) -> GameError {
    GameError::IllegalAction {
        action,
        reason: "betting was not reopened since you acted; call or fold".into(),
    }
}
