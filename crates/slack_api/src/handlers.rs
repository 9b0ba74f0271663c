mod conversations;
mod users;

pub use conversations::{
    ConversationsHandler, CreateBuilder, HistoryBuilder, InfoBuilder, ListBuilder, MembersBuilder,
    OpenBuilder, RepliesBuilder,
};
pub use users::{UserConversationsBuilder, UsersHandler};
