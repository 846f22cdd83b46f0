pub mod game;
pub mod picks;
pub mod season;
pub mod week;

pub use game::Game;
pub use picks::Picks;
pub use season::Season;
pub use week::Week;
