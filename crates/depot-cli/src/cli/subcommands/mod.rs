mod notification;

pub use notification::{AppendArgs, CoordinateArgs, ListArgs, NotificationCommands};
