//! 商店购物车
//!
//! 购物车以 JSON 数组形式保存在偏好存储的 `storeCart` 键下。

use markup5ever_rcdom::{Handle, RcDom};
use serde::{Deserialize, Serialize};

use crate::notification::{Notifier, Severity, STORE_SLOT};
use crate::parsers::html::{
    append_child, find_element_by_id, new_element, set_style_property, set_text_content,
};
use crate::storage::PreferenceStore;
use crate::translation::error::{LangError, LangResult};

pub const CART_KEY: &str = "storeCart";

pub const ADDED_MESSAGE: &str = "Product added to cart!";
pub const REMOVED_MESSAGE: &str = "Product removed from cart!";
pub const CLEARED_MESSAGE: &str = "Cart cleared!";
pub const EMPTY_MESSAGE: &str = "Your cart is empty!";
pub const CHECKOUT_MESSAGE: &str = "Redirecting to checkout...";

pub const ITEMS_CONTAINER_ID: &str = "cart-items-container";
pub const EMPTY_CART_ID: &str = "empty-cart-message";

/// 购物车条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// 购物车内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从存储读取；没有记录、记录损坏或存储故障时都返回空购物车
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        match store.load(CART_KEY) {
            Ok(Some(saved)) => serde_json::from_str(&saved).unwrap_or_else(|e| {
                tracing::warn!("存储的购物车无法解析，使用空购物车: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("读取购物车失败，使用空购物车: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &S) -> LangResult<()> {
        store.save(CART_KEY, &serde_json::to_string(self)?)
    }

    /// 添加商品，已存在时数量加一
    pub fn add(&mut self, id: u64, name: &str, price: f64) -> LangResult<()> {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.quantity = checked_quantity(item, 1)?,
            None => self.items.push(CartItem {
                id,
                name: name.to_string(),
                price,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// 移除商品，返回是否存在
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// 调整数量；数量降到 0 及以下时移除该商品
    ///
    /// 返回新的数量，商品不存在时返回 `None`，被移除时返回 `Some(0)`。
    /// 数量溢出时返回错误，购物车保持不变。
    pub fn update_quantity(&mut self, id: u64, change: i64) -> LangResult<Option<i64>> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        let quantity = checked_quantity(item, change)?;

        if quantity <= 0 {
            self.remove(id);
            Ok(Some(0))
        } else {
            item.quantity = quantity;
            Ok(Some(quantity))
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.quantity))
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn formatted_total(&self) -> String {
        format_price(self.total())
    }
}

pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn checked_quantity(item: &CartItem, change: i64) -> LangResult<i64> {
    item.quantity
        .checked_add(change)
        .ok_or(LangError::QuantityOverflow {
            id: item.id,
            quantity: item.quantity,
            change,
        })
}

/// 购物车控制器：修改、持久化并发出通知
pub struct CartController<S: PreferenceStore> {
    cart: Cart,
    store: S,
    notifier: Notifier,
}

impl<S: PreferenceStore> CartController<S> {
    pub fn new(store: S, notifier: Notifier) -> Self {
        let cart = Cart::load(&store);
        Self {
            cart,
            store,
            notifier,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn add_to_cart(&mut self, id: u64, name: &str, price: f64) -> LangResult<()> {
        self.cart.add(id, name, price)?;
        self.cart.save(&self.store)?;
        self.notifier.notify(STORE_SLOT, ADDED_MESSAGE, Severity::Success);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, id: u64) -> LangResult<()> {
        self.cart.remove(id);
        self.cart.save(&self.store)?;
        self.notifier.notify(STORE_SLOT, REMOVED_MESSAGE, Severity::Info);
        Ok(())
    }

    pub fn update_quantity(&mut self, id: u64, change: i64) -> LangResult<Option<i64>> {
        let quantity = self.cart.update_quantity(id, change)?;
        match quantity {
            Some(0) => self.remove_from_cart(id)?,
            Some(_) => self.cart.save(&self.store)?,
            None => tracing::debug!("购物车中没有商品 {}", id),
        }
        Ok(quantity)
    }

    pub fn clear_cart(&mut self) -> LangResult<()> {
        self.cart.clear();
        self.cart.save(&self.store)?;
        self.notifier.notify(STORE_SLOT, CLEARED_MESSAGE, Severity::Info);
        Ok(())
    }

    /// 结账，购物车为空时返回 `false`
    pub fn checkout(&self) -> bool {
        if self.cart.is_empty() {
            self.notifier.notify(STORE_SLOT, EMPTY_MESSAGE, Severity::Error);
            return false;
        }

        self.notifier.notify(STORE_SLOT, CHECKOUT_MESSAGE, Severity::Success);
        true
    }

    /// 更新页面上的数量和总价显示
    pub fn render_summary(&self, document: &Handle) {
        let count = self.cart.total_items().to_string();
        let total = self.cart.formatted_total();

        for (id, text) in [
            ("cart-count", &count),
            ("cart-total", &total),
            ("modal-cart-count", &count),
            ("modal-cart-total", &total),
        ] {
            if let Some(node) = find_element_by_id(document, id) {
                set_text_content(&node, text);
            }
        }
    }

    /// 重建购物车弹窗中的商品列表
    ///
    /// 购物车为空时隐藏列表并显示空购物车提示。每个条目带有数量加减和删除按钮，
    /// 按钮通过 `data-action` 与 `data-product-id` 标识操作。
    pub fn render_items(&self, dom: &RcDom) {
        let document = &dom.document;
        let container = find_element_by_id(document, ITEMS_CONTAINER_ID);
        let empty_message = find_element_by_id(document, EMPTY_CART_ID);

        if self.cart.is_empty() {
            if let Some(ref container) = container {
                set_style_property(container, "display", "none");
            }
            if let Some(ref message) = empty_message {
                set_style_property(message, "display", "block");
            }
            return;
        }

        if let Some(ref message) = empty_message {
            set_style_property(message, "display", "none");
        }
        let Some(container) = container else {
            tracing::debug!("页面没有 #{}，跳过商品列表", ITEMS_CONTAINER_ID);
            return;
        };
        set_style_property(&container, "display", "block");
        set_text_content(&container, "");

        for item in self.cart.items() {
            append_child(&container, &cart_item_element(dom, item));
        }
    }

    /// 同时更新总计和商品列表
    pub fn render_page(&self, dom: &RcDom) {
        self.render_summary(&dom.document);
        self.render_items(dom);
    }
}

fn cart_item_element(dom: &RcDom, item: &CartItem) -> Handle {
    let id = item.id.to_string();
    let text_element = |tag: &str, class: &str, text: &str| {
        let node = new_element(dom, tag, &[("class", class)]);
        set_text_content(&node, text);
        node
    };
    let action_button = |class: &str, action: &str| {
        new_element(
            dom,
            "button",
            &[
                ("type", "button"),
                ("class", class),
                ("data-action", action),
                ("data-product-id", id.as_str()),
            ],
        )
    };

    let row = new_element(dom, "div", &[("class", "cart-item"), ("data-product-id", id.as_str())]);

    let image = new_element(dom, "div", &[("class", "cart-item-image")]);
    append_child(&image, &new_element(dom, "i", &[("class", "fas fa-box")]));
    append_child(&row, &image);

    let details = new_element(dom, "div", &[("class", "cart-item-details")]);
    append_child(&details, &text_element("div", "cart-item-name", &item.name));
    append_child(&details, &text_element("div", "cart-item-price", &format_price(item.price)));
    append_child(
        &details,
        &text_element("div", "cart-item-subtotal", &format_price(item.subtotal())),
    );
    append_child(&row, &details);

    let controls = new_element(dom, "div", &[("class", "cart-item-controls")]);
    let decrease = action_button("btn-quantity", "decrease");
    set_text_content(&decrease, "-");
    append_child(&controls, &decrease);
    append_child(
        &controls,
        &text_element("span", "cart-item-quantity", &item.quantity.to_string()),
    );
    let increase = action_button("btn-quantity", "increase");
    set_text_content(&increase, "+");
    append_child(&controls, &increase);
    let remove = action_button("btn-remove-item", "remove");
    append_child(&remove, &new_element(dom, "i", &[("class", "fas fa-trash")]));
    append_child(&controls, &remove);
    append_child(&row, &controls);

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::{
        find_elements_by_class, get_node_attr, get_style_property, get_text_content, html_to_dom,
    };
    use crate::storage::MemoryStore;

    #[test]
    fn test_add_increments_existing_item() {
        let mut cart = Cart::new();
        cart.add(1, "Croquettes", 12.5).unwrap();
        cart.add(2, "Collier", 7.25).unwrap();
        cart.add(1, "Croquettes", 12.5).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.formatted_total(), "$32.25");
    }

    #[test]
    fn test_update_quantity_removes_at_zero() {
        let mut cart = Cart::new();
        cart.add(1, "Croquettes", 12.5).unwrap();

        assert_eq!(cart.update_quantity(1, 2).unwrap(), Some(3));
        assert_eq!(cart.update_quantity(1, -5).unwrap(), Some(0));
        assert!(cart.is_empty());
        assert_eq!(cart.update_quantity(1, 1).unwrap(), None);
    }

    #[test]
    fn test_quantity_overflow_is_rejected() {
        let mut cart = Cart::new();
        cart.add(1, "Croquettes", 12.5).unwrap();

        let error = cart.update_quantity(1, i64::MAX).unwrap_err();
        assert!(matches!(
            error,
            LangError::QuantityOverflow { id: 1, quantity: 1, change: i64::MAX }
        ));
        assert_eq!(cart.items()[0].quantity, 1);

        assert_eq!(cart.update_quantity(1, i64::MAX - 1).unwrap(), Some(i64::MAX));
        assert!(cart.add(1, "Croquettes", 12.5).is_err());
        assert_eq!(cart.update_quantity(1, i64::MIN).unwrap(), Some(0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_controller_overflow_keeps_stored_cart() {
        let store = MemoryStore::new();
        let mut controller = CartController::new(store.clone(), Notifier::default());
        controller.add_to_cart(1, "Croquettes", 12.5).unwrap();

        assert!(controller.update_quantity(1, i64::MAX).is_err());
        assert_eq!(Cart::load(&store).total_items(), 1);
    }

    #[test]
    fn test_persisted_as_json_array() {
        let store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(3, "Laisse", 9.0).unwrap();
        cart.save(&store).unwrap();

        let saved = store.load(CART_KEY).unwrap().unwrap();
        assert_eq!(
            saved,
            r#"[{"id":3,"name":"Laisse","price":9.0,"quantity":1}]"#
        );
        assert_eq!(Cart::load(&store), cart);
    }

    #[test]
    fn test_corrupt_cart_loads_empty() {
        let store = MemoryStore::new();
        store.save(CART_KEY, "{not json").unwrap();

        assert!(Cart::load(&store).is_empty());
    }

    #[test]
    fn test_controller_notifies_on_store_slot() {
        let store = MemoryStore::new();
        let mut controller = CartController::new(store.clone(), Notifier::default());

        assert!(!controller.checkout());
        assert_eq!(controller.notifier().active()[0].message, EMPTY_MESSAGE);

        controller.add_to_cart(1, "Croquettes", 12.5).unwrap();
        let active = controller.notifier().active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, ADDED_MESSAGE);
        assert_eq!(active[0].css_class, "cart-notification");

        assert!(controller.checkout());
        assert_eq!(Cart::load(&store).total_items(), 1);
    }

    #[test]
    fn test_render_summary() {
        let dom = html_to_dom(
            br#"<html><body><span id="cart-count">0</span><span id="cart-total">$0.00</span></body></html>"#,
            "utf-8",
        )
        .unwrap();
        let mut controller = CartController::new(MemoryStore::new(), Notifier::default());
        controller.add_to_cart(1, "Croquettes", 12.5).unwrap();
        controller.add_to_cart(1, "Croquettes", 12.5).unwrap();

        controller.render_summary(&dom.document);

        let count = find_element_by_id(&dom.document, "cart-count").unwrap();
        let total = find_element_by_id(&dom.document, "cart-total").unwrap();
        assert_eq!(get_text_content(&count), "2");
        assert_eq!(get_text_content(&total), "$25.00");
    }

    const CART_MODAL: &[u8] = br#"<html><body><div id="cartModal">
<div id="cart-items-container"><p>stale</p></div>
<p id="empty-cart-message" style="display: none">Your cart is empty</p>
</div></body></html>"#;

    #[test]
    fn test_render_items_empty_cart() {
        let dom = html_to_dom(CART_MODAL, "utf-8").unwrap();
        let controller = CartController::new(MemoryStore::new(), Notifier::default());

        controller.render_items(&dom);

        let container = find_element_by_id(&dom.document, ITEMS_CONTAINER_ID).unwrap();
        let empty = find_element_by_id(&dom.document, EMPTY_CART_ID).unwrap();
        assert_eq!(get_style_property(&container, "display").as_deref(), Some("none"));
        assert_eq!(get_style_property(&empty, "display").as_deref(), Some("block"));
    }

    #[test]
    fn test_render_items_lists_each_product() {
        let dom = html_to_dom(CART_MODAL, "utf-8").unwrap();
        let mut controller = CartController::new(MemoryStore::new(), Notifier::default());
        controller.add_to_cart(1, "Croquettes", 12.5).unwrap();
        controller.add_to_cart(1, "Croquettes", 12.5).unwrap();
        controller.add_to_cart(4, "Collier", 7.25).unwrap();

        controller.render_items(&dom);
        controller.render_items(&dom);

        let container = find_element_by_id(&dom.document, ITEMS_CONTAINER_ID).unwrap();
        let empty = find_element_by_id(&dom.document, EMPTY_CART_ID).unwrap();
        assert_eq!(get_style_property(&container, "display").as_deref(), Some("block"));
        assert_eq!(get_style_property(&empty, "display").as_deref(), Some("none"));
        assert!(!get_text_content(&container).contains("stale"));

        let rows = find_elements_by_class(&container, "cart-item");
        assert_eq!(rows.len(), 2);
        assert_eq!(get_node_attr(&rows[0], "data-product-id").as_deref(), Some("1"));

        let text_of = |row: &Handle, class: &str| {
            get_text_content(&find_elements_by_class(row, class)[0])
        };
        assert_eq!(text_of(&rows[0], "cart-item-name"), "Croquettes");
        assert_eq!(text_of(&rows[0], "cart-item-quantity"), "2");
        assert_eq!(text_of(&rows[0], "cart-item-subtotal"), "$25.00");
        assert_eq!(text_of(&rows[1], "cart-item-price"), "$7.25");

        let actions: Vec<_> = find_elements_by_class(&rows[1], "btn-quantity")
            .into_iter()
            .chain(find_elements_by_class(&rows[1], "btn-remove-item"))
            .map(|button| get_node_attr(&button, "data-action").unwrap_or_default())
            .collect();
        assert_eq!(actions, ["decrease", "increase", "remove"]);
    }
}
