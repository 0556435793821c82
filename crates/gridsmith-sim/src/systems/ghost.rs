//! Ghost refresh system: moves each enabled participant's preview to their aim target.

use crate::participant::Participant;
use crate::physics::WorldQuery;

/// Refresh every participant's ghost. Controllers with input disabled skip themselves.
pub fn run<'a, W: WorldQuery>(participants: impl Iterator<Item = &'a mut Participant>, world: &W) {
    for participant in participants {
        participant
            .inventory
            .refresh_ghost(world, &participant.pose);
    }
}
