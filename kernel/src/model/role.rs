use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
    Teacher,
    Admin,
}

impl Role {
    // mentor / teacher / admin は運営側として扱う
    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Student)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn dashboard(self) -> DashboardArea {
        if self.is_staff() {
            DashboardArea::Admin
        } else {
            DashboardArea::Student
        }
    }
}

/// The two landing pages a signed-in member can end up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardArea {
    Admin,
    Student,
}

impl DashboardArea {
    pub fn path(self) -> &'static str {
        match self {
            DashboardArea::Admin => "/adm-dashboard",
            DashboardArea::Student => "/user-dashboard",
        }
    }

    pub fn admits(self, role: Role) -> bool {
        role.dashboard() == self
    }

    /// Where a member with `role` must be sent instead of this area, if anywhere.
    pub fn redirect_for(self, role: Role) -> Option<&'static str> {
        if self.admits(role) {
            None
        } else {
            Some(role.dashboard().path())
        }
    }
}
