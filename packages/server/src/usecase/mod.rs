//! UseCase 層
//!
//! 状態を変更する操作（接続・送信・名前変更・切断）はすべて
//! [`Dispatcher`] を通じて直列化され、その中で Repository の更新と
//! MessagePusher による配信が行われます。

mod connect_participant;
mod disconnect_participant;
mod dispatcher;
mod error;
mod rename_participant;
mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use dispatcher::Dispatcher;
pub use error::{ConnectError, DisconnectError, RenameError, SendMessageError};
pub use rename_participant::RenameParticipantUseCase;
pub use send_message::SendMessageUseCase;
