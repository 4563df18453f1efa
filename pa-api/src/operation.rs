//! The table of upstream operations.
//!
//! Each [`Operation`] knows its HTTP method, path template, which key gates
//! it, and the [`ParamRules`] its arguments must satisfy.

use std::fmt;

use reqwest::Method;

use pa_core::error::KeyKind;

/// Where an operation's non-path parameters travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// URL query string.
    Query,
    /// JSON request body.
    Body,
}

/// Constraints on the named arguments of one operation.
#[derive(Debug, Clone, Copy)]
pub struct ParamRules {
    /// Names that must be present.
    pub required: &'static [&'static str],
    /// Names that may be present.
    pub optional: &'static [&'static str],
    /// Pairs that must not both be present.
    pub exclusive: &'static [(&'static str, &'static str)],
    /// Groups that are all-or-none.
    pub together: &'static [&'static [&'static str]],
    /// `(dependent, dependency)`: the dependent is only valid with the dependency.
    pub requires: &'static [(&'static str, &'static str)],
    /// At least one of these must be present (empty = no constraint).
    pub one_of: &'static [&'static str],
}

impl ParamRules {
    const NONE: ParamRules = ParamRules {
        required: &[],
        optional: &[],
        exclusive: &[],
        together: &[],
        requires: &[],
        one_of: &[],
    };

    /// Whether the operation accepts this parameter name at all.
    pub fn accepts(&self, name: &str) -> bool {
        self.required.contains(&name) || self.optional.contains(&name)
    }
}

const BOUNDING_BOX: &[&str] = &["nwlng", "nwlat", "selng", "selat"];

const SENSOR_FILTERS: &[&str] = &[
    "fields",
    "location_type",
    "read_keys",
    "show_only",
    "modified_since",
    "max_age",
    "nwlng",
    "nwlat",
    "selng",
    "selat",
    "cf",
];

/// Every upstream endpoint the client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckApiKey,
    GetSensorData,
    GetSensorsData,
    CreateGroup,
    DeleteGroup,
    AddMember,
    RemoveMember,
    GetGroups,
    GetGroup,
    GetGroupMember,
    GetGroupSensorsData,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: &'static [Operation] = &[
        Operation::CheckApiKey,
        Operation::GetSensorData,
        Operation::GetSensorsData,
        Operation::CreateGroup,
        Operation::DeleteGroup,
        Operation::AddMember,
        Operation::RemoveMember,
        Operation::GetGroups,
        Operation::GetGroup,
        Operation::GetGroupMember,
        Operation::GetGroupSensorsData,
    ];

    /// Client method name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CheckApiKey => "check_api_key",
            Operation::GetSensorData => "get_sensor_data",
            Operation::GetSensorsData => "get_sensors_data",
            Operation::CreateGroup => "create_group",
            Operation::DeleteGroup => "delete_group",
            Operation::AddMember => "add_member",
            Operation::RemoveMember => "remove_member",
            Operation::GetGroups => "get_groups",
            Operation::GetGroup => "get_group",
            Operation::GetGroupMember => "get_group_member",
            Operation::GetGroupSensorsData => "get_group_sensors_data",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Operation::CreateGroup | Operation::AddMember => Method::POST,
            Operation::DeleteGroup | Operation::RemoveMember => Method::DELETE,
            _ => Method::GET,
        }
    }

    /// Path template relative to the API root; `{name}` segments are path parameters.
    pub fn path_template(&self) -> &'static str {
        match self {
            Operation::CheckApiKey => "/keys",
            Operation::GetSensorData => "/sensors/{sensor_index}",
            Operation::GetSensorsData => "/sensors",
            Operation::CreateGroup | Operation::GetGroups => "/groups",
            Operation::DeleteGroup | Operation::GetGroup => "/groups/{group_id}",
            Operation::AddMember | Operation::GetGroupSensorsData => "/groups/{group_id}/members",
            Operation::RemoveMember | Operation::GetGroupMember => {
                "/groups/{group_id}/members/{member_id}"
            }
        }
    }

    /// Names of the `{...}` segments in the path template, in order.
    pub fn path_params(&self) -> Vec<&'static str> {
        self.path_template()
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }

    /// Key gating this operation. `None` means the caller supplies the key
    /// (key validation checks an arbitrary key).
    pub fn key_kind(&self) -> Option<KeyKind> {
        match self {
            Operation::CheckApiKey => None,
            Operation::CreateGroup
            | Operation::DeleteGroup
            | Operation::AddMember
            | Operation::RemoveMember => Some(KeyKind::Write),
            _ => Some(KeyKind::Read),
        }
    }

    pub fn placement(&self) -> Placement {
        if self.method() == Method::POST {
            Placement::Body
        } else {
            Placement::Query
        }
    }

    pub fn rules(&self) -> ParamRules {
        match self {
            Operation::CheckApiKey | Operation::GetGroups => ParamRules::NONE,
            Operation::GetSensorData => ParamRules {
                required: &["sensor_index"],
                optional: &["fields", "read_key", "cf"],
                ..ParamRules::NONE
            },
            Operation::GetSensorsData => ParamRules {
                optional: SENSOR_FILTERS,
                together: &[BOUNDING_BOX],
                ..ParamRules::NONE
            },
            Operation::GetGroupSensorsData => ParamRules {
                required: &["group_id"],
                optional: SENSOR_FILTERS,
                together: &[BOUNDING_BOX],
                ..ParamRules::NONE
            },
            Operation::CreateGroup => ParamRules {
                required: &["name"],
                ..ParamRules::NONE
            },
            Operation::DeleteGroup | Operation::GetGroup => ParamRules {
                required: &["group_id"],
                ..ParamRules::NONE
            },
            Operation::AddMember => ParamRules {
                required: &["group_id"],
                optional: &["sensor_index", "sensor_id", "owner_email", "location_type"],
                exclusive: &[("sensor_index", "sensor_id")],
                requires: &[("owner_email", "sensor_id"), ("location_type", "sensor_id")],
                one_of: &["sensor_index", "sensor_id"],
                ..ParamRules::NONE
            },
            Operation::RemoveMember => ParamRules {
                required: &["group_id", "member_id"],
                ..ParamRules::NONE
            },
            Operation::GetGroupMember => ParamRules {
                required: &["group_id", "member_id"],
                optional: &["fields", "read_key", "cf"],
                ..ParamRules::NONE
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
