pub use terrarium_core::GeneticsLogic;
pub mod animal {
    pub use terrarium_core::animal::*;
}
pub mod config {
    pub use terrarium_core::config::*;
}
pub mod genetics {
    pub use terrarium_core::genetics::*;
}
pub mod health {
    pub use terrarium_core::health::*;
}
pub mod lifecycle {
    pub use terrarium_core::lifecycle::*;
}
pub mod pack {
    pub use terrarium_core::pack::*;
}
pub mod planet {
    pub use terrarium_core::planet::*;
}
pub mod weather {
    pub use terrarium_core::weather::*;
}

pub mod ecosystem;

pub mod state {
    pub use terrarium_data::*;
}
