mod renderer;
mod state;
pub mod theme;

pub use renderer::render;
pub use state::{
    DefaultAction, DeskState, Field, Outcome, Phase, Settlement, SubmitTicket, SubmitTrigger,
};
pub use theme::Theme;
