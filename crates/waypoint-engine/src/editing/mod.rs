/*!
 * # Editing History Module
 *
 * A text buffer whose every edit is recorded as one step of a linear version
 * history, so that positions captured at one version can later be mapped to
 * any other version.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - Content is stored in an **`xi_rope::Rope`**; each version keeps its own rope,
 *   sharing structure with its neighbours
 * - Edits are expressed as **Commands** (`Cmd`) compiled to xi-rope **Deltas**
 *
 * ### 2. Append-only Version Chain
 * - Each **`VersionNode`** links to exactly one successor, once
 * - The link carries the **`ChangeSet`** of that transition, derived from the Delta
 * - Only forward transitions are stored; backward queries replay them in reverse
 *
 * ### 3. Read API: Immutable Snapshots
 * - A **`Snapshot`** pairs a version node with the rope at that version
 * - Snapshots are cheap to clone and never change after creation
 *
 * ## Module Structure
 *
 * - **`change`**: `Change` records and normalized `ChangeSet`s
 * - **`version`**: `BufferId` and the `VersionNode` chain
 * - **`snapshot`**: `Snapshot` and `SnapshotPoint`
 * - **`commands`**: `Cmd` and delta compilation
 * - **`buffer`**: `TextBuffer`, the producer of versions and snapshots
 */

pub mod buffer;
pub mod change;
pub mod commands;
pub mod snapshot;
pub mod version;

// Public API re-exports
pub use buffer::TextBuffer;
pub use change::{Change, ChangeSet};
pub use commands::{Cmd, Edit};
pub use snapshot::{Snapshot, SnapshotPoint};
pub use version::{BufferId, VersionNode};
