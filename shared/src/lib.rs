//! Weighted wheel engine: tag filtering, proportional layout, weighted draw,
//! pointer resolution and the spin animation that ties them together.

pub mod active;
pub mod draw;
pub mod entry;
pub mod error;
pub mod layout;
pub mod palette;
pub mod pointer;
pub mod session;
pub mod settings;
pub mod spin;
pub mod tags;
pub mod wheel_data;

pub use active::{resolve_active_entries, ActiveEntry};
pub use draw::{draw_winner, uniform};
pub use entry::{Entry, EntryStore, EntrySummary};
pub use error::{WheelError, WheelResult};
pub use layout::{angle_at_sector_midpoint, compute_layout, Sector};
pub use palette::ColorScheme;
pub use pointer::{normalize_angle, resolve_pointer};
pub use session::WheelSession;
pub use settings::WheelSettings;
pub use spin::{start_spin, SpinAnimator, SpinConfig, SpinFrame, SpinHandle, SpinStart};
pub use tags::TagFilterState;
pub use wheel_data::WheelData;
