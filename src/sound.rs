use std::io::Write;

use log::{debug, error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Eat,
    Explosion,
    Start,
}

/// Plays sound events on the terminal bell.
pub struct SoundBoard<W: Write> {
    out: W,
    muted: bool,
}

impl<W: Write> SoundBoard<W> {
    pub fn new(out: W, muted: bool) -> Self {
        SoundBoard { out, muted }
    }

    fn bells(sound: Sound) -> usize {
        match sound {
            Sound::Eat => 1,
            Sound::Start => 1,
            Sound::Explosion => 3,
        }
    }

    /// Fire and forget: write failures are logged and otherwise ignored.
    pub fn play(&mut self, sound: Sound) {
        debug!("Playing {:?}", sound);
        if self.muted {
            return;
        }

        let result = self
            .out
            .write_all("\x07".repeat(Self::bells(sound)).as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            error!("Error playing {:?}: {}", sound, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bells_per_sound() {
        let mut board = SoundBoard::new(Vec::new(), false);

        board.play(Sound::Eat);
        assert_eq!(board.out, b"\x07");

        board.out.clear();
        board.play(Sound::Explosion);
        assert_eq!(board.out, b"\x07\x07\x07");
    }

    #[test]
    fn test_muted_board_stays_silent() {
        let mut board = SoundBoard::new(Vec::new(), true);
        board.play(Sound::Start);
        board.play(Sound::Explosion);
        assert!(board.out.is_empty());
    }
}
