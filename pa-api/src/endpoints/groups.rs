//! Group and member endpoints.
//!
//! Creating and deleting groups and members needs the write key; listing
//! and reading them needs the read key.

use pa_core::error::PaResult;

use crate::client::ApiClient;
use crate::operation::Operation;
use crate::params::RequestParams;
use crate::query::{MemberQuery, NewMember, SensorsQuery};
use crate::response::ApiResult;

impl ApiClient {
    /// Create a group. The name may contain spaces.
    pub fn create_group(&self, name: &str) -> PaResult<ApiResult> {
        let mut params = RequestParams::new();
        params.set("name", name.trim());
        self.call(Operation::CreateGroup, params)
    }

    /// Delete a group. Succeeds with an empty body (204).
    pub fn delete_group(&self, group_id: u64) -> PaResult<ApiResult> {
        self.call(Operation::DeleteGroup, group_params(group_id))
    }

    /// Add a sensor to a group as a new member.
    pub fn add_member(&self, group_id: u64, member: &NewMember) -> PaResult<ApiResult> {
        let mut params = group_params(group_id);
        member.apply(&mut params);
        self.call(Operation::AddMember, params)
    }

    /// Remove a member from a group. `member_id` is the id within the group,
    /// not the sensor index.
    pub fn remove_member(&self, group_id: u64, member_id: u64) -> PaResult<ApiResult> {
        let mut params = group_params(group_id);
        params.set("member_id", member_id);
        self.call(Operation::RemoveMember, params)
    }

    /// Every group owned by the read key.
    pub fn get_groups(&self) -> PaResult<ApiResult> {
        self.call(Operation::GetGroups, RequestParams::new())
    }

    /// One group and its member list.
    pub fn get_group(&self, group_id: u64) -> PaResult<ApiResult> {
        self.call(Operation::GetGroup, group_params(group_id))
    }

    /// Latest data for one member of a group.
    pub fn get_group_member(
        &self,
        group_id: u64,
        member_id: u64,
        query: &MemberQuery,
    ) -> PaResult<ApiResult> {
        let mut params = group_params(group_id);
        params.set("member_id", member_id);
        query.apply(&mut params)?;
        self.call(Operation::GetGroupMember, params)
    }

    /// Latest data for every member of a group, with the same filters as
    /// [`ApiClient::get_sensors_data`].
    pub fn get_group_sensors_data(
        &self,
        group_id: u64,
        query: &SensorsQuery,
    ) -> PaResult<ApiResult> {
        let mut params = group_params(group_id);
        query.apply(&mut params)?;
        self.call(Operation::GetGroupSensorsData, params)
    }
}

fn group_params(group_id: u64) -> RequestParams {
    let mut params = RequestParams::new();
    params.set("group_id", group_id);
    params
}
