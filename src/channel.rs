/// Identifier of the relation an event originated from
///
/// An application may hold several `grafana_auth` relations at once; every
/// databag and every emitted event is scoped to exactly one of them.
pub type RelationId = u32;

/// Capability handle onto one relation's data bags
///
/// The host runtime owns the relation data bags and the leadership
/// primitive; the embedding charm hands the library one of these per
/// relation. Each side may only write its own application's namespace, and
/// only from the elected leader unit.
pub trait PeerChannel {
    /// The id of the relation this channel is scoped to
    fn relation_id(&self) -> RelationId;

    /// Whether this unit is the elected leader of its application
    fn is_leader(&self) -> bool;

    /// Reads a key from the remote application's namespace
    fn read_peer(&self, key: &str) -> Option<String>;

    /// Reads a key from this application's own namespace
    fn read_own(&self, key: &str) -> Option<String>;

    /// Writes a key into this application's own namespace
    fn write_own(&mut self, key: &str, value: String);
}
