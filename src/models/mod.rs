pub mod card;
pub mod flashcard;
pub mod pomodoro;
pub mod streak;
pub mod user;

pub use card::{Card, CardPatch, CardStatus, CardView, NewCard, NewCardRequest, UpdateCardRequest};
pub use flashcard::{
    Flashcard, FlashcardSet, FlashcardSetSummary, FlashcardSetWithCards, NewFlashcardRequest,
    NewFlashcardSetRequest, UpdateFlashcardRequest, UpdateFlashcardSetRequest,
};
pub use pomodoro::{
    Durations, NewTaskRequest, PomodoroSession, PomodoroSettings, PomodoroTask, SessionMode,
    SetCurrentTaskRequest, StartSessionRequest, UpdateSettingsRequest, UpdateTaskRequest,
};
pub use streak::{DailyStreak, StreakRequest};
pub use user::{LoginParams, NewUser, RegisterParams, User};
