/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口函数
pub use internal::entrance::remote::*;

pub mod auth {
    use crate::internal;
    pub use internal::auth::*;
    pub use internal::auth::structs::webdav_auth::{DEFAULT_TIMEOUT, WebdavAuth};
}

/// 对外提供webdav基础访问能力，不能限制死在同步核心中，以防有人自己要用
pub mod webdav {
    pub mod functions {
        use crate::internal;
        pub use internal::webdav::functions::get_folders_raw_data::*;
    }

    pub mod enums {
        use crate::internal;
        pub use internal::webdav::enums::*;
    }

    pub mod traits {
        pub use crate::internal::webdav::raw_xml::impl_multi_status::*;
    }

    pub mod structs {
        pub use crate::internal::webdav::raw_xml::raw_file::*;
    }
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}

pub mod remote_file {
    use crate::internal;
    pub use internal::remote_file::structs::*;
}

/// 传输层：能力接口与 WebDAV 实现
pub mod transport {
    use crate::internal;
    pub use internal::transport::structs::*;
    pub use internal::transport::traits::*;
}

/// 同步核心
pub mod sync {
    use crate::internal;
    pub use internal::sync::functions::list_recursive::RemoteEntry;
    pub use internal::sync::structs::*;
}

pub mod local_file {
    use crate::internal;
    pub use internal::local_file::functions::*;
    pub use internal::local_file::structs::*;
}

pub mod config {
    use crate::internal;
    pub use internal::config::structs::*;
}
