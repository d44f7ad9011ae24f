//! crates/daily_literature_core/src/catalog.rs
//!
//! The embedded quote catalog and helpers derived from it.

use std::collections::BTreeSet;

use crate::domain::{AuthorInfo, FavoriteRecord, Keyword, Quote, WorkInfo, ALL_ERAS};
use crate::search::locale_compare;

//=========================================================================================
// Embedded Data Table
//=========================================================================================

struct AuthorEntry {
    lifespan: &'static str,
    background: &'static str,
    literary_style: &'static str,
    major_works: &'static [&'static str],
}

struct WorkEntry {
    genre: &'static str,
    publish_year: &'static str,
    background: &'static str,
}

struct CatalogEntry {
    text: &'static str,
    author: &'static str,
    work: Option<&'static str>,
    era: Option<&'static str>,
    source: Option<&'static str>,
    meaning: Option<&'static str>,
    author_info: Option<AuthorEntry>,
    keywords: &'static [(&'static str, &'static str)],
    exam_points: &'static [&'static str],
    work_info: Option<WorkEntry>,
}

const SOSEKI: AuthorEntry = AuthorEntry {
    lifespan: "1867-1916",
    background: "英文学者として教壇に立った後、朝日新聞社に入社し専属作家となった。",
    literary_style: "余裕派。諧謔と知性を備えた文体で近代人の孤独とエゴイズムを描いた。",
    major_works: &["吾輩は猫である", "坊っちゃん", "草枕", "三四郎", "こころ"],
};

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        text: "吾輩は猫である。名前はまだ無い。",
        author: "夏目漱石",
        work: Some("吾輩は猫である"),
        era: Some("明治"),
        source: Some("『ホトトギス』1905年"),
        meaning: Some("猫の視点から人間社会を眺める物語の書き出し。名もない存在が語り手となる皮肉が込められている。"),
        author_info: Some(SOSEKI),
        keywords: &[
            ("吾輩", "尊大な一人称。猫が用いることで滑稽さが生まれる"),
            ("名前", "社会の中での位置づけを象徴する"),
        ],
        exam_points: &[
            "語り手を猫に設定した効果を説明できるようにする",
            "一人称「吾輩」の文体的効果を押さえる",
        ],
        work_info: Some(WorkEntry {
            genre: "長編小説",
            publish_year: "1905",
            background: "高浜虚子の勧めで『ホトトギス』に発表され、好評を受けて連載となった。",
        }),
    },
    CatalogEntry {
        text: "智に働けば角が立つ。情に棹させば流される。意地を通せば窮屈だ。とかくに人の世は住みにくい。",
        author: "夏目漱石",
        work: Some("草枕"),
        era: Some("明治"),
        source: Some("『新小説』1906年"),
        meaning: Some("理屈、感情、意地のいずれに従っても人の世は生きにくいという、非人情の旅に出る画工の述懐。"),
        author_info: Some(SOSEKI),
        keywords: &[
            ("情に棹さす", "感情の流れに乗って勢いづくこと"),
            ("非人情", "世俗の人情から離れて物事を眺める態度"),
        ],
        exam_points: &["対句表現の構造を整理する", "「非人情」の意味を本文に即して説明する"],
        work_info: Some(WorkEntry {
            genre: "中編小説",
            publish_year: "1906",
            background: "熊本時代の小天温泉への旅が素材となっている。",
        }),
    },
    CatalogEntry {
        text: "精神的に向上心のないものは馬鹿だ。",
        author: "夏目漱石",
        work: Some("こころ"),
        era: Some("大正"),
        source: Some("『朝日新聞』1914年"),
        meaning: Some("Kが先生に投げた言葉を、先生がそのままKに返す場面。恋と友情の葛藤を象徴する。"),
        author_info: Some(SOSEKI),
        keywords: &[("向上心", "精神的な高みを目指す心")],
        exam_points: &["同じ言葉がKと先生の間で持つ意味の違いを説明する"],
        work_info: None,
    },
    CatalogEntry {
        text: "国境の長いトンネルを抜けると雪国であった。夜の底が白くなった。",
        author: "川端康成",
        work: Some("雪国"),
        era: Some("昭和"),
        source: Some("創元社 1937年"),
        meaning: Some("トンネルを境に日常から非日常の世界へ移る感覚を、簡潔な叙景で示した冒頭。"),
        author_info: Some(AuthorEntry {
            lifespan: "1899-1972",
            background: "横光利一らと新感覚派を興し、1968年に日本人初のノーベル文学賞を受賞した。",
            literary_style: "叙情的で余白の多い文体。日本的な美と哀しみを描く。",
            major_works: &["伊豆の踊子", "雪国", "千羽鶴", "古都"],
        }),
        keywords: &[
            ("国境", "上野国と越後国の境。「くにざかい」とも読まれる"),
            ("夜の底", "闇の深さを空間的に捉えた新感覚派的表現"),
        ],
        exam_points: &["冒頭文の視覚的効果を説明する", "新感覚派の表現の特徴を押さえる"],
        work_info: Some(WorkEntry {
            genre: "長編小説",
            publish_year: "1937",
            background: "越後湯沢を舞台に、十数年かけて断続的に書き継がれた。",
        }),
    },
    CatalogEntry {
        text: "ある日の暮方の事である。一人の下人が、羅生門の下で雨やみを待っていた。",
        author: "芥川龍之介",
        work: Some("羅生門"),
        era: Some("大正"),
        source: Some("『帝国文学』1915年"),
        meaning: Some("荒廃した都で行き場を失った下人の姿から、生きるための悪をめぐる物語が始まる。"),
        author_info: Some(AuthorEntry {
            lifespan: "1892-1927",
            background: "東京帝国大学在学中に『鼻』が漱石に激賞され文壇に登場した。",
            literary_style: "古典に題材を取り、理知的で技巧的な短編を得意とした。",
            major_works: &["羅生門", "鼻", "地獄変", "河童"],
        }),
        keywords: &[
            ("下人", "身分の低い奉公人"),
            ("暮方", "日の暮れる頃"),
        ],
        exam_points: &["下人の心理の変化を段階的に整理する", "『今昔物語集』との関係を押さえる"],
        work_info: Some(WorkEntry {
            genre: "短編小説",
            publish_year: "1915",
            background: "『今昔物語集』の説話を素材としている。",
        }),
    },
    CatalogEntry {
        text: "恥の多い生涯を送って来ました。",
        author: "太宰治",
        work: Some("人間失格"),
        era: Some("昭和"),
        source: Some("『展望』1948年"),
        meaning: Some("人間を理解できず道化を演じ続けた男の手記の冒頭。自己否定の告白で始まる。"),
        author_info: Some(AuthorEntry {
            lifespan: "1909-1948",
            background: "井伏鱒二に師事し、戦後は無頼派の代表的作家として活躍した。",
            literary_style: "語りかけるような一人称の文体で、自意識と道化を描いた。",
            major_works: &["走れメロス", "斜陽", "人間失格"],
        }),
        keywords: &[("恥", "自己の在り方への根源的な違和感")],
        exam_points: &["手記という形式の効果を説明する"],
        work_info: None,
    },
    CatalogEntry {
        text: "石炭をば早や積み果てつ。",
        author: "森鷗外",
        work: Some("舞姫"),
        era: Some("明治"),
        source: Some("『国民之友』1890年"),
        meaning: Some("帰国の船中、ドイツでの恋と別れを回想する太田豊太郎の独白の始まり。"),
        author_info: Some(AuthorEntry {
            lifespan: "1862-1922",
            background: "陸軍軍医としてドイツに留学し、帰国後に翻訳・創作・評論で活躍した。",
            literary_style: "雅文体による格調高い文章。晩年は歴史小説に向かった。",
            major_works: &["舞姫", "雁", "高瀬舟", "阿部一族"],
        }),
        keywords: &[("積み果てつ", "積み終えてしまった。完了の助動詞「つ」")],
        exam_points: &["雅文体の文法事項を確認する", "近代的自我の目覚めと挫折を読み取る"],
        work_info: Some(WorkEntry {
            genre: "短編小説",
            publish_year: "1890",
            background: "作者自身のドイツ留学体験が下敷きになっている。",
        }),
    },
    CatalogEntry {
        text: "廻れば大門の見返り柳いと長けれど、お歯ぐろ溝に燈火うつる三階の騒ぎも手に取る如く",
        author: "樋口一葉",
        work: Some("たけくらべ"),
        era: Some("明治"),
        source: None,
        meaning: Some("吉原遊郭に隣接する下町の情景。子どもたちの世界を包む大人の世界が暗示される。"),
        author_info: None,
        keywords: &[("見返り柳", "吉原の大門前にあった柳")],
        exam_points: &[],
        work_info: None,
    },
    CatalogEntry {
        text: "春はあけぼの。やうやう白くなりゆく山ぎは、すこしあかりて、紫だちたる雲のほそくたなびきたる。",
        author: "清少納言",
        work: Some("枕草子"),
        era: Some("平安"),
        source: None,
        meaning: Some("春は夜明けが趣深いと断じ、移ろう空の色を繊細に捉えた随筆の冒頭。"),
        author_info: Some(AuthorEntry {
            lifespan: "966頃-1025頃",
            background: "一条天皇の中宮定子に仕えた女房。",
            literary_style: "機知に富んだ簡潔な文体で「をかし」の美を描いた。",
            major_works: &["枕草子"],
        }),
        keywords: &[
            ("あけぼの", "夜がほのぼのと明け始める頃"),
            ("やうやう", "だんだんと"),
            ("山ぎは", "山の稜線に接する空の部分"),
        ],
        exam_points: &["「をかし」の美意識を説明する", "体言止めの効果を押さえる"],
        work_info: Some(WorkEntry {
            genre: "随筆",
            publish_year: "1001頃",
            background: "宮廷生活の見聞や自然観照を類聚・日記・随想の章段で記した。",
        }),
    },
    CatalogEntry {
        text: "いづれの御時にか、女御、更衣あまたさぶらひたまひけるなかに、いとやむごとなき際にはあらぬが、すぐれて時めきたまふありけり。",
        author: "紫式部",
        work: Some("源氏物語"),
        era: Some("平安"),
        source: None,
        meaning: Some("身分の高くない桐壺更衣が帝の寵愛を一身に受けたことから物語が始まる。"),
        author_info: None,
        keywords: &[
            ("やむごとなし", "身分が高い。格別だ"),
            ("時めく", "寵愛を受けて栄える"),
        ],
        exam_points: &["敬語の種類と敬意の方向を整理する"],
        work_info: None,
    },
    CatalogEntry {
        text: "ゆく河の流れは絶えずして、しかももとの水にあらず。",
        author: "鴨長明",
        work: Some("方丈記"),
        era: Some("鎌倉"),
        source: None,
        meaning: Some("絶えず流れる河に人と住まいのはかなさを重ねた、無常観を象徴する一文。"),
        author_info: None,
        keywords: &[("無常", "すべてのものは移り変わり、常住不変ではないこと")],
        exam_points: &["無常観の表現を本文から抜き出す"],
        work_info: Some(WorkEntry {
            genre: "随筆",
            publish_year: "1212",
            background: "大火・辻風・飢饉・地震などの災厄を経て、日野山の方丈の庵で記された。",
        }),
    },
    CatalogEntry {
        text: "月日は百代の過客にして、行かふ年も又旅人也。",
        author: "松尾芭蕉",
        work: Some("おくのほそ道"),
        era: Some("江戸"),
        source: None,
        meaning: Some("時の流れそのものを旅人に見立て、人生を旅とする芭蕉の思想を示す序文。"),
        author_info: Some(AuthorEntry {
            lifespan: "1644-1694",
            background: "伊賀上野の出身。江戸深川の芭蕉庵を拠点に各地を旅した。",
            literary_style: "さび・しおり・軽みを理念とする蕉風俳諧を確立した。",
            major_works: &["野ざらし紀行", "笈の小文", "おくのほそ道"],
        }),
        keywords: &[("過客", "旅人"), ("百代", "永遠")],
        exam_points: &["対句と漢文訓読調の表現を確認する"],
        work_info: Some(WorkEntry {
            genre: "紀行文",
            publish_year: "1702",
            background: "1689年に門人曾良と奥羽・北陸を巡った旅をもとにする。",
        }),
    },
    CatalogEntry {
        text: "雨ニモマケズ　風ニモマケズ　雪ニモ夏ノ暑サニモマケヌ　丈夫ナカラダヲモチ",
        author: "宮沢賢治",
        work: Some("雨ニモマケズ"),
        era: Some("昭和"),
        source: Some("手帳に記された遺稿"),
        meaning: Some("病床の作者が理想とする生き方を書きつけた祈りのような詩句。"),
        author_info: None,
        keywords: &[("デクノボー", "役に立たない者と呼ばれても他者のために生きる姿")],
        exam_points: &[],
        work_info: None,
    },
    CatalogEntry {
        text: "人間は誰でも猛獣使であり、その猛獣に当るのが、各人の性情だという。",
        author: "中島敦",
        work: Some("山月記"),
        era: Some("昭和"),
        source: Some("『文學界』1942年"),
        meaning: Some("虎となった李徴が、自らの臆病な自尊心と尊大な羞恥心を省みる言葉。"),
        author_info: None,
        keywords: &[
            ("性情", "生まれつきの性質"),
            ("臆病な自尊心", "傷つくことを恐れて自らを磨かなかった心"),
        ],
        exam_points: &["李徴が虎になった理由を本文に即して説明する"],
        work_info: None,
    },
];

impl CatalogEntry {
    fn to_quote(&self) -> Quote {
        Quote {
            text: self.text.to_string(),
            author: self.author.to_string(),
            work: self.work.map(str::to_string),
            era: self.era.map(str::to_string),
            source: self.source.map(str::to_string),
            meaning: self.meaning.map(str::to_string),
            author_info: self.author_info.as_ref().map(|a| AuthorInfo {
                lifespan: a.lifespan.to_string(),
                background: a.background.to_string(),
                literary_style: a.literary_style.to_string(),
                major_works: a.major_works.iter().map(|w| w.to_string()).collect(),
            }),
            keywords: (!self.keywords.is_empty()).then(|| {
                self.keywords
                    .iter()
                    .map(|(word, meaning)| Keyword {
                        word: word.to_string(),
                        meaning: meaning.to_string(),
                    })
                    .collect()
            }),
            exam_points: (!self.exam_points.is_empty())
                .then(|| self.exam_points.iter().map(|p| p.to_string()).collect()),
            work_info: self.work_info.as_ref().map(|w| WorkInfo {
                genre: w.genre.to_string(),
                publish_year: w.publish_year.to_string(),
                background: w.background.to_string(),
            }),
        }
    }
}

//=========================================================================================
// Catalog Operations
//=========================================================================================

/// Builds the quote catalog in the order of the embedded table.
pub fn generate_catalog() -> Vec<Quote> {
    CATALOG.iter().map(CatalogEntry::to_quote).collect()
}

/// Returns `"all"` followed by every distinct era present in the catalog.
pub fn available_eras(catalog: &[Quote]) -> Vec<String> {
    let distinct: BTreeSet<&str> = catalog
        .iter()
        .filter_map(|q| q.era.as_deref())
        .filter(|era| !era.is_empty())
        .collect();

    let mut eras: Vec<&str> = distinct.into_iter().collect();
    eras.sort_by(|a, b| locale_compare(a, b));

    std::iter::once(ALL_ERAS)
        .chain(eras)
        .map(str::to_string)
        .collect()
}

/// Resolves a stored favorite back to the full catalog entry.
///
/// Falls back to the favorite's own snapshot with placeholder sections when the
/// catalog no longer holds a quote with the same author and text.
pub fn complete_favorite(catalog: &[Quote], favorite: &FavoriteRecord) -> Quote {
    if let Some(quote) = catalog
        .iter()
        .find(|q| q.author == favorite.author && q.text == favorite.text)
    {
        return quote.clone();
    }

    let mut quote = favorite.to_quote();
    quote.author_info.get_or_insert_with(|| AuthorInfo {
        lifespan: "詳細不明".to_string(),
        background: "この作者についての詳細情報は現在準備中です。".to_string(),
        literary_style: "詳細情報準備中".to_string(),
        major_works: vec!["詳細情報準備中".to_string()],
    });
    quote.keywords.get_or_insert_with(|| {
        vec![
            Keyword {
                word: "文学的表現".to_string(),
                meaning: "この名文に含まれる特徴的な表現技法や文学的な工夫".to_string(),
            },
            Keyword {
                word: "時代背景".to_string(),
                meaning: "この名文が生まれた歴史的・文化的な背景".to_string(),
            },
        ]
    });
    quote.exam_points.get_or_insert_with(|| {
        vec![
            "この名文の文学史上の意義を理解する".to_string(),
            "作者の他の作品との関連性を把握する".to_string(),
            "時代背景と作品の関係性を考察する".to_string(),
        ]
    });
    quote
        .meaning
        .get_or_insert_with(|| "この名文についての詳細な解説は準備中です。".to_string());
    quote.work_info.get_or_insert_with(|| WorkInfo {
        genre: "文学作品".to_string(),
        publish_year: "詳細不明".to_string(),
        background: "作品についての詳細情報は準備中です。".to_string(),
    });
    quote
}
