/// One of the forty books of the Ihya, by global position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogBook {
    pub id: u32,
    pub english_title: &'static str,
    pub arabic_title: &'static str,
}

const fn book(id: u32, english_title: &'static str, arabic_title: &'static str) -> CatalogBook {
    CatalogBook {
        id,
        english_title,
        arabic_title,
    }
}

pub const IHYA_BOOKS: [CatalogBook; 40] = [
    book(1, "Book of Knowledge", "كتاب العلم"),
    book(2, "Foundations of Belief", "كتاب قواعد العقائد"),
    book(3, "Mysteries of Purity", "كتاب أسرار الطهارة"),
    book(4, "Secrets of Prayer", "كتاب أسرار الصلاة"),
    book(5, "Secrets of Zakat", "كتاب أسرار الزكاة"),
    book(6, "Secrets of Fasting", "كتاب أسرار الصوم"),
    book(7, "Secrets of Hajj", "كتاب أسرار الحج"),
    book(8, "Etiquette of Quran Recitation", "كتاب آداب تلاوة القرآن"),
    book(9, "Invocations and Supplications", "كتاب الأذكار والدعوات"),
    book(10, "Arrangement of Litanies", "كتاب ترتيب الأوراد وتفصيل إحياء الليل"),
    book(11, "Etiquette of Eating", "كتاب آداب الأكل"),
    book(12, "Etiquette of Marriage", "كتاب آداب النكاح"),
    book(13, "Etiquette of Earning a Livelihood", "كتاب آداب الكسب والمعاش"),
    book(14, "The Lawful and Prohibited", "كتاب الحلال والحرام"),
    book(15, "Etiquette of Companionship", "كتاب آداب الصحبة والمعاشرة"),
    book(16, "Etiquette of Seclusion", "كتاب آداب العزلة"),
    book(17, "Etiquette of Travel", "كتاب آداب السفر"),
    book(18, "Etiquette of Sama and Wajd", "كتاب آداب السماع والوجد"),
    book(19, "Enjoining Good and Forbidding Evil", "كتاب الأمر بالمعروف والنهي عن المنكر"),
    book(20, "Prophetic Mannerisms", "كتاب آداب المعيشة وأخلاق النبوة"),
    book(21, "Wonders of the Heart", "كتاب عجائب القلب"),
    book(22, "Disciplining the Soul", "كتاب رياضة النفس"),
    book(23, "Breaking the Two Desires", "كتاب كسر الشهوتين"),
    book(24, "Harms of the Tongue", "كتاب آفات اللسان"),
    book(25, "Condemnation of Anger and Envy", "كتاب ذم الغضب والحقد والحسد"),
    book(26, "Condemnation of the World", "كتاب ذم الدنيا"),
    book(27, "Condemnation of Miserliness", "كتاب ذم البخل وذم حب المال"),
    book(28, "Condemnation of Status and Ostentation", "كتاب ذم الجاه والرياء"),
    book(29, "Condemnation of Pride and Conceit", "كتاب ذم الكبر والعجب"),
    book(30, "Condemnation of Self-Delusion", "كتاب ذم الغرور"),
    book(31, "Repentance", "كتاب التوبة"),
    book(32, "Patience and Gratitude", "كتاب الصبر والشكر"),
    book(33, "Fear and Hope", "كتاب الخوف والرجاء"),
    book(34, "Poverty and Abstinence", "كتاب الفقر والزهد"),
    book(35, "Tawhid and Trust", "كتاب التوحيد والتوكل"),
    book(36, "Love, Longing, and Intimacy", "كتاب المحبة والشوق والأنس والرضا"),
    book(37, "Intention, Sincerity, and Truthfulness", "كتاب النية والإخلاص والصدق"),
    book(38, "Watchfulness and Self-Examination", "كتاب المراقبة والمحاسبة"),
    book(39, "Meditation", "كتاب التفكر"),
    book(40, "Remembrance of Death", "كتاب ذكر الموت وما بعده"),
];

pub const BOOKS_PER_VOLUME: u32 = 10;

pub fn by_global_id(id: u32) -> Option<&'static CatalogBook> {
    IHYA_BOOKS.iter().find(|book| book.id == id)
}
