pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

pub enum EngineEvent {
    /// Seed again from the same source
    Reseed,
}

pub enum AppEvent {
    CameraEvent(CameraEvent),

    /// Exit the application
    Exit,
}

pub enum CameraEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ResetView,
    Resize { cols: u16, rows: u16 },
}
