// Player data: CSV normalization, typed records, and the lookup index.

pub mod category;
pub mod csv_import;
pub mod index;
pub mod record;

pub use category::{Category, ALL_CATEGORIES, GOALIE_CATEGORIES, SKATER_CATEGORIES};
pub use csv_import::{load_players, parse_player_bytes, parse_players, LoadError};
pub use index::PlayerIndex;
pub use record::{coerce_number, normalize_key, parse_number, PlayerRecord};
