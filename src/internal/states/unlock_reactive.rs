//! # UnlockReactiveProperty
//!
//! 轻量级响应式属性容器，读写都不阻塞，适合高频更新（如传输进度条）。
//! 内部直接复用 [`super::reactive_core::ReactiveProperty`]。
//!
//! ## 使用示例
//! ```rust,no_run
//! use webdav_sync::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0);
//! prop.update(1).unwrap();
//! assert_eq!(prop.get_current(), Some(1));
//! ```

pub use super::reactive_core::{
    PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError,
};

/// 轻量级响应式属性容器（纯通知机制）。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
