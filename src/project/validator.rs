use super::model::Project;

/// A non-fatal finding. Exports still run; the finding only explains surprising output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub message: String,
}

impl ValidationIssue {
    fn new(msg: impl Into<String>) -> Self {
        ValidationIssue {
            message: msg.into(),
        }
    }
}

pub fn validate_project(project: &Project) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if project.rooms.is_empty() {
        issues.push(ValidationIssue::new("project has no rooms"));
    }

    for room in &project.rooms {
        if room.name.trim().is_empty() {
            issues.push(ValidationIssue::new(format!(
                "room '{}' has no name and will be exported under a fallback name",
                room.id
            )));
        }

        validate_indentation(&room.id, &room.objects, &mut issues);
    }

    for (index, connection) in project.connections.iter().enumerate() {
        if connection.source.is_none() || connection.target.is_none() {
            issues.push(ValidationIssue::new(format!(
                "connection #{} is not docked at both ends and produces no exit",
                index
            )));
        } else if connection.is_stub() {
            issues.push(ValidationIssue::new(format!(
                "connection #{} loops back to its own compass point and produces no exit",
                index
            )));
        }
    }

    issues
}

// The parser nests on relative indentation only, so a jump of several columns
// is accepted. We just point it out.
fn validate_indentation(room_id: &str, objects: &str, issues: &mut Vec<ValidationIssue>) {
    let mut previous: Option<usize> = None;

    for line in objects.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let indent = line.chars().take_while(|c| *c == ' ').count();
        let allowed = previous.map_or(0, |p| p + 1);
        if indent > allowed {
            issues.push(ValidationIssue::new(format!(
                "room '{}' object '{}' is indented {} columns where at most {} would be expected",
                room_id, name, indent, allowed
            )));
        }
        previous = Some(indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CompassPoint;
    use crate::project::{Connection, Endpoint, Room, RoomId};

    fn endpoint(room: usize, point: CompassPoint) -> Endpoint {
        Endpoint {
            room: RoomId(room),
            point,
        }
    }

    #[test]
    fn clean_project_has_no_issues() {
        let project = Project {
            rooms: vec![
                Room::new("a", "Attic").with_objects("trunk\n hat"),
                Room::new("b", "Bedroom"),
            ],
            connections: vec![Connection::new(
                endpoint(0, CompassPoint::South),
                endpoint(1, CompassPoint::North),
            )],
            ..Default::default()
        };
        assert!(validate_project(&project).is_empty());
    }

    #[test]
    fn flags_unnamed_rooms_and_undocked_connections() {
        let mut undocked = Connection::new(
            endpoint(0, CompassPoint::East),
            endpoint(0, CompassPoint::West),
        );
        undocked.target = None;

        let project = Project {
            rooms: vec![Room::new("a", "  ")],
            connections: vec![
                undocked,
                Connection::new(endpoint(0, CompassPoint::East), endpoint(0, CompassPoint::East)),
            ],
            ..Default::default()
        };

        let issues = validate_project(&project);
        assert_eq!(issues.len(), 3);
        assert!(issues[0].message.contains("fallback name"));
        assert!(issues[1].message.contains("not docked"));
        assert!(issues[2].message.contains("loops back"));
    }

    #[test]
    fn flags_indentation_jumps_without_rejecting_them() {
        let project = Project {
            rooms: vec![Room::new("a", "Attic").with_objects("  hat\ntrunk\n    key\n     coin")],
            ..Default::default()
        };

        let issues = validate_project(&project);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("'hat'"));
        assert!(issues[1].message.contains("'key'"));
    }
}
