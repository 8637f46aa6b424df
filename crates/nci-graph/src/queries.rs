//! The fixed Cypher statements the dashboard runs
//!
//! Schema: `(:Zip {code})-[:HAS_COMPLAINT {count}]->(:ComplaintType {name})`
//! and `(:Zip)-[:LOCATED_IN]->(:Borough {name})`.

/// Every zip → complaint type relationship, with the zip's borough when known.
///
/// Columns: `zip`, `complaint_type`, `borough` (nullable), `count`.
pub const ALL_COMPLAINTS: &str = "\
MATCH (z:Zip)-[r:HAS_COMPLAINT]->(c:ComplaintType)
OPTIONAL MATCH (z)-[:LOCATED_IN]->(b:Borough)
RETURN z.code AS zip, c.name AS complaint_type, b.name AS borough, r.count AS count";

/// Complaint types of one zip, heaviest first.
///
/// Parameter: `zip`. Columns: `zip`, `complaint`, `count`.
pub const ZIP_COMPLAINTS: &str = "\
MATCH (z:Zip {code: $zip})-[r:HAS_COMPLAINT]->(c:ComplaintType)
RETURN z.code AS zip, c.name AS complaint, r.count AS count
ORDER BY count DESC";

/// Connectivity probe
pub const PING: &str = "RETURN 1 AS ok";
