//! Fixed-timestep simulation module
//!
//! All gameplay logic lives here. No rendering, audio, or I/O: the sim
//! emits events and draw-ready state, and collaborators consume them.
//! Iteration over entity collections always rebuilds survivors rather
//! than removing in place.

pub mod combat;
pub mod mask;
pub mod state;
pub mod tick;
pub mod wave;

pub use mask::{sprites_overlap, SpriteKind, SpriteMask};
pub use state::{
    Enemy, EnemyVariant, GameEvent, GamePhase, GameState, Player, Projectile, ShipCore,
};
pub use tick::{tick, TickInput};
pub use wave::replenish_wave;
