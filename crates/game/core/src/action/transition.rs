use crate::engine::GameEvent;
use crate::env::RngOracle;
use crate::state::GameState;

/// Mutable facilities an action may use while applying: the random source
/// and the event sink.
pub struct ActionContext<'a> {
    rng: &'a mut dyn RngOracle,
    events: Vec<GameEvent>,
}

impl<'a> ActionContext<'a> {
    pub fn new(rng: &'a mut dyn RngOracle) -> Self {
        Self {
            rng,
            events: Vec::new(),
        }
    }

    pub fn rng(&mut self) -> &mut (dyn RngOracle + 'a) {
        &mut *self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. The hooks get
/// read-only state and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }
}
