use crate::models::{Post, Profile, ProfileStatus};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub const SEED_COMMUNITY: &str = "海和院小区";

fn utc(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    title: &str,
    content: &str,
    author: &str,
    author_id: &str,
    is_emergency: bool,
    likes: u32,
    comments: u32,
    image: &str,
    location: &str,
    tags: &[&str],
    created: &str,
) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        author_id: author_id.to_string(),
        is_emergency,
        likes,
        comments,
        images: vec![image.to_string()],
        location: location.to_string(),
        tags: strings(tags),
        create_time: utc(created),
        update_time: utc(created),
    }
}

pub fn seed_posts() -> Vec<Post> {
    vec![
        post(
            "F20250826-001",
            "紧急救助！发现受伤小猫",
            "在XX路发现一只受伤的小猫，后腿似乎受伤了，无法正常行走。急需医疗救助，有爱心人士愿意帮忙吗？小猫很亲人，应该是被遗弃的家猫。",
            "爱心用户A",
            "user_001",
            true,
            12,
            5,
            "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=400",
            "上海市杨浦区五角场",
            &["救助", "紧急", "猫", "受伤"],
            "2025-08-26T10:00:00Z",
        ),
        post(
            "F20250826-002",
            "小区发现流浪狗一只",
            "小区门口有只流浪狗，看起来很饿，已经投喂了一些食物。狗狗很温顺，不会攻击人，希望能找到收养的好心人。",
            "热心居民",
            "user_002",
            false,
            8,
            3,
            "https://images.unsplash.com/photo-1587300003388-59208cc962cb?w=400",
            "北京市朝阳区望京",
            &["流浪狗", "投喂", "领养"],
            "2025-08-26T08:00:00Z",
        ),
        post(
            "F20250826-003",
            "寻找橘猫主人",
            "在公园捡到一只橘猫，很亲人，应该是走失的宠物猫。猫咪很健康，已经做过绝育，希望能帮它找到主人。",
            "公园志愿者",
            "user_003",
            false,
            15,
            7,
            "https://images.unsplash.com/photo-1513360371669-4adf3dd7dff8?w=400",
            "广州市天河区珠江新城",
            &["寻主", "橘猫", "走失"],
            "2025-08-26T06:00:00Z",
        ),
        post(
            "F20250826-004",
            "需要猫粮狗粮捐赠",
            "我们救助站目前收养了20多只流浪猫狗，粮食快用完了，希望爱心人士能捐赠一些猫粮狗粮，感谢大家的支持！",
            "阳光救助站",
            "user_004",
            false,
            25,
            10,
            "https://images.unsplash.com/photo-1601758228041-f3b2795255f1?w=400",
            "深圳市福田区",
            &["捐赠", "猫粮", "狗粮", "救助站"],
            "2025-08-26T05:00:00Z",
        ),
        post(
            "F20250826-005",
            "三花猫找领养",
            "救助的三花猫，约1岁，已绝育驱虫疫苗齐全，性格温顺亲人，找靠谱领养人，需要签领养协议，定期回访。",
            "猫咪救助小组",
            "user_005",
            false,
            18,
            12,
            "https://images.unsplash.com/photo-1513245543132-31f507417b26?w=400",
            "上海市浦东新区",
            &["领养", "三花猫", "已绝育"],
            "2025-08-25T14:00:00Z",
        ),
    ]
}

fn rescued_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "A20250826-001".to_string(),
            name: "小橘".to_string(),
            kind: "猫".to_string(),
            breed: "中华田园猫".to_string(),
            gender: "公".to_string(),
            age_estimate: "6个月".to_string(),
            weight: "2.5kg".to_string(),
            fur_color: "橘白相间".to_string(),
            health_status: "良好".to_string(),
            current_status: ProfileStatus::Waiting.as_str().to_string(),
            rescue_date: "2025-06-28".to_string(),
            rescue_location: "上海市杨浦区五角场".to_string(),
            rescuer: "志愿者小林".to_string(),
            photos: strings(&["https://images.unsplash.com/photo-1574158622682-e40e69881006?w=400"]),
            community: None,
            description: "性格活泼亲人，已做驱虫和疫苗".to_string(),
            sterilized: "未绝育".to_string(),
            vaccinated: "已接种".to_string(),
            contact: "13800138000".to_string(),
            create_time: utc("2025-06-28T10:00:00Z"),
            update_time: None,
        },
        Profile {
            id: "A20250826-002".to_string(),
            name: "小黑".to_string(),
            kind: "狗".to_string(),
            breed: "拉布拉多".to_string(),
            gender: "母".to_string(),
            age_estimate: "2岁".to_string(),
            weight: "18kg".to_string(),
            fur_color: "纯黑色".to_string(),
            health_status: "康复中".to_string(),
            current_status: ProfileStatus::Medical.as_str().to_string(),
            rescue_date: "2025-06-25".to_string(),
            rescue_location: "北京市朝阳区".to_string(),
            rescuer: "爱心救助团".to_string(),
            photos: strings(&["https://images.unsplash.com/photo-1558788353-f76d92427f16?w=400"]),
            community: None,
            description: "车祸受伤，正在恢复中".to_string(),
            sterilized: "已绝育".to_string(),
            vaccinated: "已接种".to_string(),
            contact: "13900139000".to_string(),
            create_time: utc("2025-06-25T14:20:00Z"),
            update_time: None,
        },
        Profile {
            id: "A20250826-003".to_string(),
            name: "小白".to_string(),
            kind: "猫".to_string(),
            breed: "英短".to_string(),
            gender: "母".to_string(),
            age_estimate: "1岁".to_string(),
            weight: "3.2kg".to_string(),
            fur_color: "纯白色".to_string(),
            health_status: "良好".to_string(),
            current_status: ProfileStatus::Adopted.as_str().to_string(),
            rescue_date: "2025-07-10".to_string(),
            rescue_location: "深圳市福田区".to_string(),
            rescuer: "救助站".to_string(),
            photos: strings(&["https://images.unsplash.com/photo-1560114928-40f1f1eb26a0?w=400"]),
            community: None,
            description: "温柔安静，适合家庭饲养".to_string(),
            sterilized: "已绝育".to_string(),
            vaccinated: "已接种".to_string(),
            contact: "13700137000".to_string(),
            create_time: utc("2025-07-10T09:15:00Z"),
            update_time: None,
        },
    ]
}

struct CommunityCat {
    name: &'static str,
    color: &'static str,
    sterilized: bool,
    spot: &'static str,
    character: &'static str,
}

const fn cat(
    name: &'static str,
    color: &'static str,
    sterilized: bool,
    spot: &'static str,
    character: &'static str,
) -> CommunityCat {
    CommunityCat { name, color, sterilized, spot, character }
}

const COMMUNITY_CATS: [CommunityCat; 32] = [
    cat("大黄", "黄狸花", true, "北大门", "亲人"),
    cat("小花", "三花", true, "3号楼下", "温顺"),
    cat("黑仔", "纯黑", false, "地下车库", "胆小"),
    cat("虎子", "狸花", true, "1号楼", "活泼"),
    cat("奶牛", "黑白", true, "花园", "慵懒"),
    cat("橘子", "橘猫", false, "2号楼", "贪吃"),
    cat("小灰", "灰色", true, "垃圾房", "警惕"),
    cat("豹子", "狸花", true, "南门", "独立"),
    cat("雪球", "纯白", false, "4号楼", "粘人"),
    cat("煤球", "纯黑", true, "停车场", "安静"),
    cat("花花", "三花", true, "5号楼", "友善"),
    cat("大白", "纯白", true, "西门", "懒散"),
    cat("斑斑", "狸花", false, "6号楼", "顽皮"),
    cat("咪咪", "橘白", true, "东门", "温柔"),
    cat("球球", "黑白", true, "7号楼", "好奇"),
    cat("毛毛", "长毛橘", true, "8号楼", "高冷"),
    cat("点点", "狸花", false, "9号楼", "敏感"),
    cat("妮妮", "三花", true, "10号楼", "活泼"),
    cat("皮皮", "橘猫", true, "篮球场", "调皮"),
    cat("乖乖", "黑白", true, "小广场", "乖巧"),
    cat("胖胖", "橘白", false, "11号楼", "贪吃"),
    cat("瘦瘦", "狸花", true, "12号楼", "机灵"),
    cat("长腿", "黑白", true, "健身区", "优雅"),
    cat("短腿", "橘猫", true, "儿童区", "憨厚"),
    cat("大王", "狸花", false, "13号楼", "霸气"),
    cat("小乖", "三花", true, "14号楼", "文静"),
    cat("阿福", "橘白", true, "15号楼", "福气"),
    cat("招财", "橘猫", true, "商铺区", "亲人"),
    cat("进宝", "黑白", false, "快递站", "机警"),
    cat("平安", "狸花", true, "保安室", "稳重"),
    cat("健康", "三花", true, "凉亭", "健壮"),
    cat("快乐", "橘白", true, "花坛", "欢快"),
];

const CAT_PHOTOS: [&str; 7] = [
    "https://images.unsplash.com/photo-1573865526739-10659fec78a5?w=400",
    "https://images.unsplash.com/photo-1533738363-b7f9aef128ce?w=400",
    "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?w=400",
    "https://images.unsplash.com/photo-1543852786-1cf6624b9987?w=400",
    "https://images.unsplash.com/photo-1511044568932-338cba0ad803?w=400",
    "https://images.unsplash.com/photo-1494256997604-768d1f608cac?w=400",
    "https://images.unsplash.com/photo-1519052537078-e6302a4968d4?w=400",
];

/// Builds the tracked community-cat batch. Age, weight and creation time are
/// randomised on every call.
pub fn community_cats() -> Vec<Profile> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    COMMUNITY_CATS
        .iter()
        .enumerate()
        .map(|(index, cat)| {
            let age_years: u32 = rng.gen_range(1..=5);
            let weight_kg: f64 = rng.gen_range(2.0..5.0);
            let age_ms: i64 = rng.gen_range(0..30 * 24 * 60 * 60 * 1000);

            Profile {
                id: format!("A20250826-HY{:03}", index + 1),
                name: cat.name.to_string(),
                kind: "猫".to_string(),
                breed: "中华田园猫".to_string(),
                gender: if index % 3 == 0 { "公" } else { "母" }.to_string(),
                age_estimate: format!("{}岁", age_years),
                weight: format!("{:.1}kg", weight_kg),
                fur_color: cat.color.to_string(),
                health_status: "良好".to_string(),
                current_status: ProfileStatus::Community.as_str().to_string(),
                rescue_date: "2025-01-01".to_string(),
                rescue_location: format!("{}{}", SEED_COMMUNITY, cat.spot),
                rescuer: "小区志愿者".to_string(),
                photos: vec![CAT_PHOTOS[index % CAT_PHOTOS.len()].to_string()],
                community: Some(SEED_COMMUNITY.to_string()),
                description: format!("性格{}，定期投喂中", cat.character),
                sterilized: if cat.sterilized { "已绝育" } else { "未绝育" }.to_string(),
                vaccinated: if cat.sterilized { "已接种" } else { "未接种" }.to_string(),
                contact: "小区物业：021-12345678".to_string(),
                create_time: now - Duration::milliseconds(age_ms),
                update_time: None,
            }
        })
        .collect()
}

pub fn seed_profiles() -> Vec<Profile> {
    let mut profiles = rescued_profiles();
    profiles.extend(community_cats());
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_timestamps_parse() {
        let posts = seed_posts();
        assert_eq!(posts[0].create_time.to_rfc3339(), "2025-08-26T10:00:00+00:00");
        assert!(posts.iter().all(|p| p.create_time == p.update_time));
    }

    #[test]
    fn community_cats_are_numbered_and_recent() {
        let cats = community_cats();
        let now = Utc::now();

        assert_eq!(cats.len(), 32);
        assert_eq!(cats[0].id, "A20250826-HY001");
        assert_eq!(cats[31].id, "A20250826-HY032");
        assert_eq!(cats[0].gender, "公");
        assert_eq!(cats[1].gender, "母");
        assert_eq!(cats[2].vaccinated, "未接种");
        assert!(cats
            .iter()
            .all(|c| c.create_time <= now && now - c.create_time <= Duration::days(30)));
    }
}
