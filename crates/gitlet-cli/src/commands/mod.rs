// Copyright (C) 2026  Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
// Command modules for the Gitlet CLI
pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;

pub use add::AddCmd;
pub use branch::BranchCmd;
pub use checkout::CheckoutCmd;
pub use commit::CommitCmd;
pub use find::FindCmd;
pub use global_log::GlobalLogCmd;
pub use init::InitCmd;
pub use log::LogCmd;
pub use merge::MergeCmd;
pub use reset::ResetCmd;
pub use rm::RmCmd;
pub use rm_branch::RmBranchCmd;
pub use status::StatusCmd;
