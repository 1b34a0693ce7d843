use clap::{Parser, ValueEnum};
use nao_core::Dance;

/// Command line options for the show.
#[derive(Parser, Debug)]
#[command(version, about = "Greets the audience, dances and sits down again")]
pub struct Args {
    /// The dance to perform.
    #[arg(long, value_enum, default_value_t = DanceChoice::Macarena)]
    pub dance: DanceChoice,

    /// Do not generate missing speech files before the show.
    #[arg(long)]
    pub skip_speech: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DanceChoice {
    Gangnam,
    Macarena,
    Taichi,
}

impl From<DanceChoice> for Dance {
    fn from(choice: DanceChoice) -> Self {
        match choice {
            DanceChoice::Gangnam => Dance::Gangnam,
            DanceChoice::Macarena => Dance::Macarena,
            DanceChoice::Taichi => Dance::TaiChi,
        }
    }
}
