//! 页面交互组件
//!
//! - `forms`: 必填字段校验
//! - `bulk`: 客户批量选择与删除
//! - `cart`: 商店购物车
//! - `modal`: 弹窗打开、关闭与表单重置

pub mod bulk;
pub mod cart;
pub mod forms;
pub mod modal;

pub use bulk::{
    find_csrf_token, run_bulk_delete, select_all, BulkDeleteClient, BulkDeleteRequest,
    BulkDeleteResponse, BulkOutcome, BulkSelection, SelectedClient,
};
pub use cart::{Cart, CartController, CartItem, CART_KEY};
pub use forms::{FormReport, FormValidator};
pub use modal::ModalManager;
