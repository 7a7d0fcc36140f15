use std::fmt;

/// The eight entity kinds the inventory exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Computer,
    Site,
    Analysis,
    Task,
    Fixlet,
    Action,
    Property,
    Role,
}

impl EntityKind {
    /// Singular path segment, also used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Computer => "computer",
            EntityKind::Site => "site",
            EntityKind::Analysis => "analysis",
            EntityKind::Task => "task",
            EntityKind::Fixlet => "fixlet",
            EntityKind::Action => "action",
            EntityKind::Property => "property",
            EntityKind::Role => "role",
        }
    }

    /// Plural path segment used by list endpoints.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Computer => "computers",
            EntityKind::Site => "sites",
            EntityKind::Analysis => "analyses",
            EntityKind::Task => "tasks",
            EntityKind::Fixlet => "fixlets",
            EntityKind::Action => "actions",
            EntityKind::Property => "properties",
            EntityKind::Role => "roles",
        }
    }

    /// Rate-limiter tag for list calls.
    pub fn list_tag(&self) -> &'static str {
        match self {
            EntityKind::Computer => "bigfix_computer_list",
            EntityKind::Site => "bigfix_site_list",
            EntityKind::Analysis => "bigfix_analysis_list",
            EntityKind::Task => "bigfix_task_list",
            EntityKind::Fixlet => "bigfix_fixlet_list",
            EntityKind::Action => "bigfix_action_list",
            EntityKind::Property => "bigfix_property_list",
            EntityKind::Role => "bigfix_role_list",
        }
    }

    /// Rate-limiter tag for single-entity calls.
    pub fn get_tag(&self) -> &'static str {
        match self {
            EntityKind::Computer => "bigfix_computer_get",
            EntityKind::Site => "bigfix_site_get",
            EntityKind::Analysis => "bigfix_analysis_get",
            EntityKind::Task => "bigfix_task_get",
            EntityKind::Fixlet => "bigfix_fixlet_get",
            EntityKind::Action => "bigfix_action_get",
            EntityKind::Property => "bigfix_property_get",
            EntityKind::Role => "bigfix_role_get",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
