pub mod jobmodel;
pub mod paymentmodel;
pub mod projectmodel;
pub mod taskmodel;
pub mod teammodel;
pub mod timelogmodel;
pub mod usermodel;
pub mod workermodel;

use uuid::Uuid;

/// A record that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;

    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }
}

impl Owned for projectmodel::Project {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for paymentmodel::Payment {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for taskmodel::Task {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for teammodel::Team {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

impl Owned for workermodel::Worker {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
