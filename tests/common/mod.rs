// 集成测试公共模块
//
// 提供测试页面、DOM 辅助函数和测试用存储

use std::path::PathBuf;

use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{RcDom, SerializableHandle};
use tempfile::TempDir;

use clinic_lang::parsers::html::{find_element_by_id, get_node_attr, get_text_content};
use clinic_lang::storage::{MemoryStore, PreferenceStore, RedbStore};
use clinic_lang::translation::error::{LangError, LangResult};

/// HTML 测试辅助工具
pub struct HtmlTestHelper;

#[allow(dead_code)]
impl HtmlTestHelper {
    /// 创建测试用 DOM
    pub fn create_test_dom(html: &str) -> RcDom {
        clinic_lang::parsers::html_to_dom(html.as_bytes(), "utf-8")
            .expect("test HTML should parse")
    }

    /// 序列化 DOM，不消耗它
    pub fn to_html(dom: &RcDom) -> String {
        let mut buf = Vec::new();
        let serializable: SerializableHandle = dom.document.clone().into();
        serialize(&mut buf, &serializable, SerializeOpts::default())
            .expect("DOM should serialize");
        String::from_utf8(buf).expect("serialized DOM should be UTF-8")
    }

    pub fn text_of(dom: &RcDom, id: &str) -> String {
        let node = find_element_by_id(&dom.document, id)
            .unwrap_or_else(|| panic!("element #{} should exist", id));
        get_text_content(&node)
    }

    pub fn attr_of(dom: &RcDom, id: &str, attr: &str) -> Option<String> {
        let node = find_element_by_id(&dom.document, id)
            .unwrap_or_else(|| panic!("element #{} should exist", id));
        get_node_attr(&node, attr)
    }

    /// 法语版客户列表页面
    pub fn create_clients_page() -> String {
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <title>Gestion des Clients</title>
    <script>var label = "Nom";</script>
</head>
<body>
    <nav>
        <button class="lang-btn active" data-lang="fr" id="btn-fr">FR</button>
        <button class="lang-btn" data-lang="en" id="btn-en">EN</button>
        <span class="welcome-fr" id="greet-fr">Bienvenue</span>
        <span class="welcome-en" id="greet-en" style="display: none">Welcome</span>
        <a href="/dashboard/" id="nav-dashboard">Tableau de bord</a>
    </nav>
    <main>
        <h1 id="heading">Gestion des Clients</h1>
        <input type="text" id="search" placeholder="Rechercher un client..." required>
        <button type="button" id="add">Ajouter</button>
        <table>
            <thead><tr><th id="col-name">Nom</th><th id="col-phone">Téléphone</th><th>Actions</th></tr></thead>
            <tbody>
                <tr><td id="client-name">Jean Dupont</td><td>06 12 34 56 78</td><td><a href="/clients/1/" id="edit">Modifier</a></td></tr>
            </tbody>
        </table>
        <p id="note">Rendez-vous du lundi</p>
        <label for="status" id="status-label">Statut</label>
        <select id="status"><option id="status-active">Actif</option><option>Inactif</option></select>
    </main>
</body>
</html>"#
            .to_string()
    }

    /// 含必填字段的客户表单
    pub fn create_form_page(first_name: &str, last_name: &str) -> String {
        format!(
            r#"<html><head><title>Clients</title></head><body>
<form id="addClientForm">
    <input type="text" name="first_name" id="first_name" value="{}" required>
    <input type="text" name="last_name" id="last_name" value="{}" required>
    <input type="text" name="phone" id="phone">
</form>
</body></html>"#,
            first_name, last_name
        )
    }
}

/// 总是失败的存储（模拟隐私模式或配额耗尽）
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn load(&self, _key: &str) -> LangResult<Option<String>> {
        Err(LangError::StorageError("storage disabled".to_string()))
    }

    fn save(&self, _key: &str, _value: &str) -> LangResult<()> {
        Err(LangError::StorageError("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> LangResult<()> {
        Err(LangError::StorageError("storage disabled".to_string()))
    }
}

/// 测试环境：临时目录加内存存储
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub memory_store: MemoryStore,
}

#[allow(dead_code)]
impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("temp dir should be created"),
            memory_store: MemoryStore::new(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.temp_dir.path().join("preferences.redb")
    }

    pub fn open_redb(&self) -> RedbStore {
        RedbStore::open(self.store_path()).expect("redb store should open")
    }

    pub fn write_page(&self, name: &str, html: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, html).expect("page should be written");
        path
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
