// GloveLink — Session State
//
// Owns the gesture state machines and the mode the hub has put the unit in.
// The session loop in main feeds it three kinds of input — hub command bytes,
// timestamped sensor edges, and poll ticks — and reads back the mode, the
// requested feedback, and the frame snapshot to transmit.

use crate::config::HAND_SIDE;
use crate::events::{HubCommand, InputEvent};
use crate::gesture::flex::FlexDebouncer;
use crate::gesture::frame::GestureFrame;
use crate::gesture::tap::TapCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Waiting in the menu for the hub to pick a mode.
    Idle,
    /// Streaming encoded gesture frames.
    PlayGame,
    /// Streaming raw sensor values for the hub's plotter.
    PlotData,
    /// Terminal — the session loop exits.
    Quit,
}

/// Side effect requested by a hub command, executed by the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Collision in the game — fire one vibration pulse.
    Vibrate,
}

pub struct SessionState {
    mode: SessionMode,
    left_taps: TapCounter,
    right_taps: TapCounter,
    flex: FlexDebouncer,
    speed: u8,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Idle,
            left_taps: TapCounter::new(),
            right_taps: TapCounter::new(),
            flex: FlexDebouncer::new(),
            speed: 0,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Latest gear from the sampling window, held until the next sample.
    pub fn set_speed(&mut self, gear: u8) {
        self.speed = gear;
    }

    /// Apply one hub command. Mode transitions happen here and nowhere else.
    pub fn handle_command(&mut self, command: HubCommand) -> Option<Feedback> {
        match (self.mode, command) {
            // Game over forces a shutdown from any mode.
            (_, HubCommand::ForceQuit) => {
                self.mode = SessionMode::Quit;
                None
            }
            // Menu selections.
            (SessionMode::Idle, HubCommand::StartPlay) => {
                self.mode = SessionMode::PlayGame;
                None
            }
            (SessionMode::Idle, HubCommand::StartPlot) => {
                self.mode = SessionMode::PlotData;
                None
            }
            // Leaving the menu itself powers the unit down.
            (SessionMode::Idle, HubCommand::ReturnToMenu) => {
                self.mode = SessionMode::Quit;
                None
            }
            (SessionMode::PlayGame | SessionMode::PlotData, HubCommand::ReturnToMenu) => {
                self.mode = SessionMode::Idle;
                None
            }
            // Collision feedback only makes sense mid-game; mode unchanged.
            (SessionMode::PlayGame, HubCommand::Collision) => Some(Feedback::Vibrate),
            _ => None,
        }
    }

    /// Feed one timestamped sensor edge into the owning state machine.
    pub fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::TapLeft { at_ms } => self.left_taps.on_tap(at_ms),
            InputEvent::TapRight { at_ms } => self.right_taps.on_tap(at_ms),
            InputEvent::FlexRise { at_ms } => self.flex.on_flex(at_ms),
            InputEvent::FlexFall { at_ms } => self.flex.on_unflex(at_ms),
        }
    }

    /// Advance the deadline-driven timers. Call once per loop iteration.
    pub fn poll(&mut self, now_ms: u32) {
        self.left_taps.poll(now_ms);
        self.right_taps.poll(now_ms);
        self.flex.poll(now_ms);
    }

    /// Snapshot the current gesture state for this transmission cycle.
    pub fn frame(&self) -> GestureFrame {
        GestureFrame {
            hand: HAND_SIDE,
            motion: self.flex.motion(),
            speed: self.speed,
            left_taps: self.left_taps.count(),
            right_taps: self.right_taps.count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::flex::Motion;
    use crate::gesture::frame::decode;

    #[test]
    fn menu_selections_enter_the_chosen_mode() {
        let mut session = SessionState::new();
        assert_eq!(session.mode(), SessionMode::Idle);

        session.handle_command(HubCommand::StartPlay);
        assert_eq!(session.mode(), SessionMode::PlayGame);

        let mut session = SessionState::new();
        session.handle_command(HubCommand::StartPlot);
        assert_eq!(session.mode(), SessionMode::PlotData);
    }

    #[test]
    fn force_quit_wins_from_any_mode() {
        for setup in [None, Some(HubCommand::StartPlay), Some(HubCommand::StartPlot)] {
            let mut session = SessionState::new();
            if let Some(cmd) = setup {
                session.handle_command(cmd);
            }
            session.handle_command(HubCommand::ForceQuit);
            assert_eq!(session.mode(), SessionMode::Quit);
        }
    }

    #[test]
    fn return_to_menu_leaves_play_mode() {
        let mut session = SessionState::new();
        session.handle_command(HubCommand::StartPlay);
        session.handle_command(HubCommand::ReturnToMenu);
        assert_eq!(session.mode(), SessionMode::Idle);
    }

    #[test]
    fn return_to_menu_from_the_menu_quits() {
        let mut session = SessionState::new();
        session.handle_command(HubCommand::ReturnToMenu);
        assert_eq!(session.mode(), SessionMode::Quit);
    }

    #[test]
    fn collision_vibrates_only_while_playing() {
        let mut session = SessionState::new();
        assert_eq!(session.handle_command(HubCommand::Collision), None);

        session.handle_command(HubCommand::StartPlay);
        assert_eq!(
            session.handle_command(HubCommand::Collision),
            Some(Feedback::Vibrate)
        );
        // Mode must be untouched by the feedback pulse.
        assert_eq!(session.mode(), SessionMode::PlayGame);

        let mut session = SessionState::new();
        session.handle_command(HubCommand::StartPlot);
        assert_eq!(session.handle_command(HubCommand::Collision), None);
    }

    #[test]
    fn play_mode_selections_do_not_stack() {
        let mut session = SessionState::new();
        session.handle_command(HubCommand::StartPlay);
        // A second menu selection mid-game is ignored.
        session.handle_command(HubCommand::StartPlot);
        assert_eq!(session.mode(), SessionMode::PlayGame);
    }

    #[test]
    fn frame_reflects_events_speed_and_timeouts() {
        let mut session = SessionState::new();
        session.handle_command(HubCommand::StartPlay);

        session.apply_event(InputEvent::TapRight { at_ms: 1_000 });
        session.set_speed(2);

        let byte = session.frame().encode();
        assert_eq!(byte, 0b0000_1001); // bit0 right tap, gear 2, forward

        // Window expiry clears the tap presence on the next cycle.
        session.poll(6_100);
        let decoded = decode(session.frame().encode());
        assert!(!decoded.right_taps_present);
        assert_eq!(decoded.speed, 2);
    }

    #[test]
    fn flex_edges_drive_the_motion_bit() {
        let mut session = SessionState::new();
        session.apply_event(InputEvent::FlexRise { at_ms: 1_000 });
        assert_eq!(session.frame().motion, Motion::Backward);

        session.apply_event(InputEvent::FlexFall { at_ms: 1_100 });
        assert_eq!(session.frame().motion, Motion::Forward);
    }
}
